//! # seminar-csv
//!
//! Submission rows for a reading-group seminar: CSV import/export, the
//! public/admin/archive column views and the per-meeting archive.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lib_seminar_csv::{from_csv, to_csv, CsvOptions, Schema};
//!
//! // Read an admin export, keeping only the archive columns
//! let table = from_csv("rrg_archive.csv", &CsvOptions::default(), Schema::Archive).unwrap();
//!
//! // Print one line per meeting
//! for group in table.group_by_meeting() {
//!     println!("{}: {}", group.label(), group.summary());
//! }
//!
//! // Publish without email and admin notes
//! to_csv(&table.reproject(Schema::ArchivePublic), "archive.csv", &CsvOptions::default()).unwrap();
//! ```
//!
//! ## Features
//!
//! - Lenient quote-aware CSV reader, minimal-quoting writer
//! - Rows keyed by a closed set of columns, projected per view
//! - Archive grouping with status and slides counts
//! - Session state with pluggable persistence

pub mod api;
pub mod archive;
pub mod column;
pub mod csv;
pub mod error;
pub mod row;
pub mod schedule;
pub mod schema;
pub mod session;
pub mod submission;
pub mod table;

pub use crate::api::{ApiResponse, friendly_message};
pub use crate::archive::{GroupSummary, MeetingGroup, format_readable_date, group_by_meeting};
pub use crate::column::Column;
pub use crate::csv::{
    CsvDocument, CsvOptions, Encoding, from_csv, from_csv_bytes, from_csv_str, parse_csv, to_csv,
    to_csv_bytes, to_csv_string,
};
pub use crate::error::{Result, SeminarError};
pub use crate::row::{Row, normalize_rows};
pub use crate::schedule::{next_meeting_date, next_wednesday};
pub use crate::schema::Schema;
pub use crate::session::{
    FileSessionStore, MemorySessionStore, Session, SessionStore, Theme, Verification,
};
pub use crate::submission::{
    SlidesForm, SlidesReview, SlidesUpload, SubmissionForm, export_file_name, pending_emails,
    submitter_roster,
};
pub use crate::table::Table;
