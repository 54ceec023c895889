use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::{Result, SeminarError};
use crate::row::Row;
use crate::session::Verification;

/// Status given to every new submission
pub const PENDING: &str = "pending";

/// Status of a submission selected for a long talk
pub const LONG: &str = "long";

/// Roster name for a submitter who left the participant field empty
pub const UNKNOWN_PARTICIPANT: &str = "Unknown";

/// Raw text of the submission form, as typed by the participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub participant: String,
    pub email: String,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub journal: String,
    pub doi: String,
    pub link: String,
}

impl SubmissionForm {
    /// Build the meeting row for this form
    ///
    /// Every field is trimmed. The row starts out `pending` with no admin
    /// note and no slides.
    ///
    /// # Errors
    /// - `SeminarError::MissingField` if participant, email or title is empty
    pub fn into_row(self, meeting: &str) -> Result<Row> {
        let row = Row::new()
            .with(Column::Meeting, meeting.trim())
            .with(Column::Participant, self.participant.trim())
            .with(Column::Email, self.email.trim())
            .with(Column::Title, self.title.trim())
            .with(Column::Authors, self.authors.trim())
            .with(Column::Year, self.year.trim())
            .with(Column::Journal, self.journal.trim())
            .with(Column::Doi, self.doi.trim())
            .with(Column::Link, self.link.trim())
            .with(Column::Status, PENDING)
            .with(Column::AdminNote, "")
            .with(Column::Slides, "");

        for required in [Column::Participant, Column::Email, Column::Title] {
            if row.value(required).is_empty() {
                return Err(SeminarError::MissingField(required));
            }
        }

        Ok(row)
    }

    /// Whether this form may be sent with the given verification
    pub fn is_verified_by(&self, verification: Option<&Verification>) -> bool {
        verification.is_some_and(|v| v.matches(self.email.trim()))
    }
}

/// The slides form, filled in after a submission was selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidesForm {
    pub slides: String,
}

impl SlidesForm {
    /// Build the slides request for a meeting
    ///
    /// The slides link is trimmed and the request is sent as the verified
    /// email, with its session token.
    ///
    /// # Errors
    /// - `SeminarError::NotVerified` if there is no verification
    /// - `SeminarError::MissingField` if the slides link is empty
    pub fn into_upload(
        self,
        meeting: &str,
        verification: Option<&Verification>,
    ) -> Result<SlidesUpload> {
        let verification = verification
            .filter(|v| !v.email.is_empty() && !v.session_token.is_empty())
            .ok_or(SeminarError::NotVerified)?;

        let slides = self.slides.trim();
        if slides.is_empty() {
            return Err(SeminarError::MissingField(Column::Slides));
        }

        Ok(SlidesUpload {
            meeting: meeting.trim().to_string(),
            email: verification.email.clone(),
            slides: slides.to_string(),
            session_token: verification.session_token.clone(),
        })
    }
}

/// Body of a `slides` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidesUpload {
    pub meeting: String,
    pub email: String,
    pub slides: String,
    pub session_token: String,
}

/// What a submitter's status means for a slides upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidesReview {
    /// No submission for this meeting under the verified email
    NoSubmission,
    /// Submitted, but not selected for a long talk. Uploading needs confirmation
    NotLongTalk,
    /// Selected for a long talk
    Ready,
}

impl SlidesReview {
    /// Review the status answered to `userStatus`
    pub fn of(status: Option<&str>) -> Self {
        match status {
            None | Some("") => SlidesReview::NoSubmission,
            Some(status) if status.eq_ignore_ascii_case(LONG) => SlidesReview::Ready,
            Some(_) => SlidesReview::NotLongTalk,
        }
    }

    /// Message to show the submitter, if uploading should not go ahead silently
    pub fn message(self) -> Option<&'static str> {
        match self {
            SlidesReview::NoSubmission => Some("No submission found for this meeting."),
            SlidesReview::NotLongTalk => {
                Some("You have not been selected for a long talk. Do you wish to continue?")
            }
            SlidesReview::Ready => None,
        }
    }
}

/// One `participant (email)` line per distinct submitter, sorted
///
/// Rows without an email are skipped. The first row seen for an email names
/// the submitter.
pub fn submitter_roster(rows: &[Row]) -> Vec<String> {
    let mut submitters: IndexMap<&str, &str> = IndexMap::new();
    for row in rows {
        let email = row.value(Column::Email).trim();
        if email.is_empty() {
            continue;
        }
        submitters
            .entry(email)
            .or_insert_with(|| match row.value(Column::Participant).trim() {
                "" => UNKNOWN_PARTICIPANT,
                participant => participant,
            });
    }

    let mut roster: Vec<String> = submitters
        .into_iter()
        .map(|(email, participant)| format!("{participant} ({email})"))
        .collect();
    roster.sort();
    roster
}

/// Emails of every pending submission, in row order without repeats
pub fn pending_emails(rows: &[Row]) -> IndexSet<String> {
    rows.iter()
        .filter(|row| row.status_is(PENDING))
        .map(|row| row.value(Column::Email))
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}

/// File name of the admin CSV export for a meeting
pub fn export_file_name(meeting: &str) -> String {
    format!("rrg_{meeting}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn form() -> SubmissionForm {
        SubmissionForm {
            participant: " Ann ".to_string(),
            email: "ann@example.org\n".to_string(),
            title: "Paper, One".to_string(),
            year: "2024".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_row() {
        let row = form().into_row("2026-03-04").unwrap();

        assert_eq!(row.value(Column::Participant), "Ann");
        assert_eq!(row.value(Column::Email), "ann@example.org");
        assert_eq!(row.value(Column::Year), "2024");
        assert_eq!(row.value(Column::Status), PENDING);
        assert_eq!(row, row.project(Schema::Meeting));
    }

    #[test]
    fn test_required_fields() {
        let missing_title = SubmissionForm {
            title: "   ".to_string(),
            ..form()
        };
        assert!(matches!(
            missing_title.into_row("2026-03-04"),
            Err(SeminarError::MissingField(Column::Title))
        ));

        let empty = SubmissionForm::default();
        assert!(matches!(
            empty.into_row("2026-03-04"),
            Err(SeminarError::MissingField(Column::Participant))
        ));
    }

    #[test]
    fn test_verification_must_match_email() {
        let verified = Verification::new("ann@example.org", "token-1");
        let other = Verification::new("bob@example.org", "token-2");

        assert!(form().is_verified_by(Some(&verified)));
        assert!(!form().is_verified_by(Some(&other)));
        assert!(!form().is_verified_by(None));
    }

    #[test]
    fn test_slides_upload() {
        let verified = Verification::new("ann@example.org", "token-1");
        let form = SlidesForm {
            slides: "  https://example.org/s.pdf \n".to_string(),
        };

        let upload = form.into_upload("2026-03-04", Some(&verified)).unwrap();
        assert_eq!(upload.slides, "https://example.org/s.pdf");
        assert_eq!(upload.email, "ann@example.org");
        assert_eq!(upload.session_token, "token-1");
        assert_eq!(
            serde_json::to_value(&upload).unwrap(),
            serde_json::json!({
                "meeting": "2026-03-04",
                "email": "ann@example.org",
                "slides": "https://example.org/s.pdf",
                "sessionToken": "token-1"
            })
        );
    }

    #[test]
    fn test_slides_need_verification_and_link() {
        let form = SlidesForm {
            slides: "https://example.org/s.pdf".to_string(),
        };
        assert!(matches!(
            form.clone().into_upload("2026-03-04", None),
            Err(SeminarError::NotVerified)
        ));
        assert!(matches!(
            form.into_upload("2026-03-04", Some(&Verification::new("", ""))),
            Err(SeminarError::NotVerified)
        ));

        let verified = Verification::new("ann@example.org", "token-1");
        assert!(matches!(
            SlidesForm::default().into_upload("2026-03-04", Some(&verified)),
            Err(SeminarError::MissingField(Column::Slides))
        ));
    }

    #[test]
    fn test_slides_review() {
        assert_eq!(SlidesReview::of(None), SlidesReview::NoSubmission);
        assert_eq!(SlidesReview::of(Some("")), SlidesReview::NoSubmission);
        assert_eq!(SlidesReview::of(Some("approved")), SlidesReview::NotLongTalk);
        assert_eq!(SlidesReview::of(Some("Long")), SlidesReview::Ready);
        assert_eq!(SlidesReview::Ready.message(), None);
        assert_eq!(
            SlidesReview::NoSubmission.message(),
            Some("No submission found for this meeting.")
        );
    }

    #[test]
    fn test_submitter_roster() {
        let rows = vec![
            Row::new()
                .with(Column::Participant, "Bob")
                .with(Column::Email, " bob@example.org "),
            Row::new()
                .with(Column::Participant, "")
                .with(Column::Email, "zed@example.org"),
            Row::new()
                .with(Column::Participant, "Robert")
                .with(Column::Email, "bob@example.org"),
            Row::new().with(Column::Participant, "No Email"),
            Row::new()
                .with(Column::Participant, " Ann ")
                .with(Column::Email, "ann@example.org"),
        ];

        assert_eq!(
            submitter_roster(&rows),
            vec![
                "Ann (ann@example.org)".to_string(),
                "Bob (bob@example.org)".to_string(),
                "Unknown (zed@example.org)".to_string(),
            ]
        );
        assert!(submitter_roster(&[]).is_empty());
    }

    #[test]
    fn test_pending_emails() {
        let rows = vec![
            Row::new()
                .with(Column::Status, "Pending")
                .with(Column::Email, "ann@example.org"),
            Row::new()
                .with(Column::Status, "approved")
                .with(Column::Email, "bob@example.org"),
            Row::new().with(Column::Status, "pending"),
            Row::new()
                .with(Column::Status, "pending")
                .with(Column::Email, "ann@example.org"),
            Row::new()
                .with(Column::Status, "pending")
                .with(Column::Email, "cy@example.org"),
        ];

        let pending = pending_emails(&rows);
        let emails: Vec<&str> = pending.iter().map(String::as_str).collect();
        assert_eq!(emails, vec!["ann@example.org", "cy@example.org"]);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("2026-03-04"), "rrg_2026-03-04.csv");
    }
}
