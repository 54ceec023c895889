//! Named column schemas
//!
//! A schema fixes both the header order of a CSV export and the set of
//! columns a projected row keeps.

use std::fmt;
use std::str::FromStr;

use crate::column::Column;
use crate::error::SeminarError;

const MEETING_COLUMNS: &[Column] = &[
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
];

const MEETING_PUBLIC_COLUMNS: &[Column] = &[
    Column::Meeting,
    Column::Participant,
    Column::Title,
    Column::Authors,
    Column::Year,
    Column::Journal,
    Column::Doi,
    Column::Link,
    Column::Status,
    Column::AdminNote,
    Column::Slides,
];

const ARCHIVE_COLUMNS: &[Column] = &[
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

const ARCHIVE_PUBLIC_COLUMNS: &[Column] = &[
    Column::Meeting,
    Column::Participant,
    Column::Title,
    Column::Authors,
    Column::Year,
    Column::Journal,
    Column::Doi,
    Column::Link,
    Column::Status,
    Column::Slides,
    Column::RecordedAt,
];

/// The views a set of rows can be projected to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Every meeting column, used for the admin export
    Meeting,
    /// Meeting columns without `email`
    MeetingPublic,
    /// Meeting columns plus `recorded_at`
    Archive,
    /// Archive columns without `email` and `admin_note`
    ArchivePublic,
}

impl Schema {
    /// Columns of this schema, in header order
    pub const fn columns(&self) -> &'static [Column] {
        match self {
            Schema::Meeting => MEETING_COLUMNS,
            Schema::MeetingPublic => MEETING_PUBLIC_COLUMNS,
            Schema::Archive => ARCHIVE_COLUMNS,
            Schema::ArchivePublic => ARCHIVE_PUBLIC_COLUMNS,
        }
    }

    /// Number of columns
    pub const fn len(&self) -> usize {
        self.columns().len()
    }

    /// Schemas are never empty, this exists for API symmetry with `len`
    pub const fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Check if a column belongs to this schema
    pub fn contains(&self, column: Column) -> bool {
        self.columns().contains(&column)
    }

    /// Header names in order
    pub fn header(&self) -> Vec<&'static str> {
        self.columns().iter().map(Column::name).collect()
    }

    /// The schema with private columns removed
    pub const fn public(&self) -> Schema {
        match self {
            Schema::Meeting | Schema::MeetingPublic => Schema::MeetingPublic,
            Schema::Archive | Schema::ArchivePublic => Schema::ArchivePublic,
        }
    }

    /// Short name used in logs and on the command line of the demos
    pub const fn name(&self) -> &'static str {
        match self {
            Schema::Meeting => "meeting",
            Schema::MeetingPublic => "meeting-public",
            Schema::Archive => "archive",
            Schema::ArchivePublic => "archive-public",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Schema {
    type Err = SeminarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(Schema::Meeting),
            "meeting-public" => Ok(Schema::MeetingPublic),
            "archive" => Ok(Schema::Archive),
            "archive-public" => Ok(Schema::ArchivePublic),
            _ => Err(SeminarError::UnknownSchema(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_drops_email_only() {
        let full = Schema::Meeting.header();
        let public = Schema::MeetingPublic.header();
        let expected: Vec<&str> = full.into_iter().filter(|name| *name != "email").collect();
        assert_eq!(public, expected);
    }

    #[test]
    fn test_archive_appends_recorded_at() {
        let archive = Schema::Archive.columns();
        assert_eq!(&archive[..12], Schema::Meeting.columns());
        assert_eq!(archive.last(), Some(&Column::RecordedAt));
    }

    #[test]
    fn test_archive_public_has_no_private_columns() {
        assert!(Schema::ArchivePublic.columns().iter().all(|c| !c.is_private()));
        assert_eq!(Schema::ArchivePublic.len(), 11);
        assert_eq!(Schema::Archive.public(), Schema::ArchivePublic);
    }

    #[test]
    fn test_parse_name() {
        for schema in [
            Schema::Meeting,
            Schema::MeetingPublic,
            Schema::Archive,
            Schema::ArchivePublic,
        ] {
            assert_eq!(schema.name().parse::<Schema>().unwrap(), schema);
        }
        assert!("admin".parse::<Schema>().is_err());
    }
}
