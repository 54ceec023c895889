//! Example: Read an archive CSV and print one summary line per meeting

use std::path::Path;

use lib_seminar_csv::{CsvOptions, Schema, from_csv};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let csv_path = Path::new("demos/data/archive.csv");
    let table = from_csv(csv_path, &CsvOptions::default(), Schema::Archive)?;

    println!("Archive");
    println!("Rows: {}", table.len());
    println!();

    for group in table.group_by_meeting() {
        println!("{} - {}", group.label(), group.summary());
        for row in group.rows() {
            println!("    {}", row.value(lib_seminar_csv::Column::Title));
        }
    }

    Ok(())
}
