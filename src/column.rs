use std::fmt;
use std::str::FromStr;

use crate::error::SeminarError;

/// Every column a submission row can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// Meeting date the submission belongs to, usually `YYYY-MM-DD`
    Meeting,
    /// Name of the participant presenting the paper
    Participant,
    /// Verified email of the participant. Never published
    Email,
    /// Paper title
    Title,
    Authors,
    /// Publication year, kept as text
    Year,
    Journal,
    Doi,
    /// Link to the paper
    Link,
    /// Review status: pending, approved, long or vetoed
    Status,
    /// Free-form note from the organizers. Admin only
    AdminNote,
    /// Link to the slides, once uploaded
    Slides,
    /// Timestamp the row was moved to the archive
    RecordedAt,
}

impl Column {
    /// All columns in declaration order
    pub const ALL: [Column; 13] = [
        Column::Meeting,
        Column::Participant,
        Column::Email,
        Column::Title,
        Column::Authors,
        Column::Year,
        Column::Journal,
        Column::Doi,
        Column::Link,
        Column::Status,
        Column::AdminNote,
        Column::Slides,
        Column::RecordedAt,
    ];

    /// Get the header name of this column
    pub const fn name(&self) -> &'static str {
        match self {
            Column::Meeting => "meeting",
            Column::Participant => "participant",
            Column::Email => "email",
            Column::Title => "title",
            Column::Authors => "authors",
            Column::Year => "year",
            Column::Journal => "journal",
            Column::Doi => "doi",
            Column::Link => "link",
            Column::Status => "status",
            Column::AdminNote => "admin_note",
            Column::Slides => "slides",
            Column::RecordedAt => "recorded_at",
        }
    }

    /// Parse a column from its header name. Matching is exact
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "meeting" => Some(Column::Meeting),
            "participant" => Some(Column::Participant),
            "email" => Some(Column::Email),
            "title" => Some(Column::Title),
            "authors" => Some(Column::Authors),
            "year" => Some(Column::Year),
            "journal" => Some(Column::Journal),
            "doi" => Some(Column::Doi),
            "link" => Some(Column::Link),
            "status" => Some(Column::Status),
            "admin_note" => Some(Column::AdminNote),
            "slides" => Some(Column::Slides),
            "recorded_at" => Some(Column::RecordedAt),
            _ => None,
        }
    }

    /// Whether this column may only be shown to organizers
    pub const fn is_private(&self) -> bool {
        matches!(self, Column::Email | Column::AdminNote)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = SeminarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_name(s).ok_or_else(|| SeminarError::UnknownColumn(s.to_string()))
    }
}
