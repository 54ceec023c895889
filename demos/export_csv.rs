//! Example: Turn a submission form into a row, then export the meeting for
//! the organizers and for the public page

use chrono::Local;
use lib_seminar_csv::{
    CsvOptions, Schema, Session, SubmissionForm, Table, Verification, export_file_name,
    next_meeting_date, schedule::meeting_key, to_csv,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let meeting = meeting_key(next_meeting_date(Local::now().date_naive(), false));

    let session = Session {
        verification: Some(Verification::new("ann@example.org", "demo-token")),
        ..Default::default()
    };

    let form = SubmissionForm {
        participant: "Ann".to_string(),
        email: "ann@example.org".to_string(),
        title: "Paper, One".to_string(),
        authors: "A. Author".to_string(),
        year: "2024".to_string(),
        ..Default::default()
    };

    if !form.is_verified_by(session.verification.as_ref()) {
        return Err("verify the email before submitting".into());
    }

    let mut table = Table::new(Schema::Meeting);
    table.push(form.into_row(&meeting)?);

    let admin_file = export_file_name(&meeting);
    to_csv(&table, &admin_file, &CsvOptions::default())?;
    println!("Exported {} rows to {}", table.len(), admin_file);

    let public = table.reproject(Schema::MeetingPublic);
    println!();
    println!("{}", public.to_csv_string()?);

    Ok(())
}
