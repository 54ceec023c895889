use indexmap::IndexSet;

use crate::archive::{MeetingGroup, group_by_meeting};
use crate::column::Column;
use crate::error::{Result, SeminarError};
use crate::row::Row;
use crate::schema::Schema;
use crate::submission::{pending_emails, submitter_roster};

/// A schema plus an ordered list of rows. The in-memory form of one CSV export
///
/// Rows added through [`Table::push`] or [`Table::from_rows`] are projected
/// onto the schema, so every stored row carries exactly the schema's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table for a schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Create a table from rows, projecting each row onto the schema
    pub fn from_rows<I: IntoIterator<Item = Row>>(schema: Schema, rows: I) -> Self {
        Self {
            schema,
            rows: rows.into_iter().map(|row| row.project(schema)).collect(),
        }
    }

    /// Get the schema
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a slice of all rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by index
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a mutable row by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    /// Append a row, projected onto the table's schema
    pub fn push(&mut self, row: Row) {
        self.rows.push(row.project(self.schema));
    }

    /// Remove a row by index
    ///
    /// # Errors
    /// - `SeminarError::RowIndexOutOfBounds` if the index is out of bounds
    pub fn remove(&mut self, index: usize) -> Result<Row> {
        if index >= self.rows.len() {
            return Err(SeminarError::RowIndexOutOfBounds {
                index,
                len: self.rows.len(),
            });
        }

        Ok(self.rows.remove(index))
    }

    /// Remove all rows but keep the schema
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Sort rows by a key function. The sort is stable
    pub fn sort_rows_by<F, K>(&mut self, f: F)
    where
        F: FnMut(&Row) -> K,
        K: Ord,
    {
        self.rows.sort_by_key(f);
    }

    /// Rows belonging to one meeting, in table order
    pub fn meeting_rows<'a>(&'a self, meeting: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.value(Column::Meeting) == meeting)
    }

    /// Convert the table to another schema
    ///
    /// Typically used to strip private columns before publishing, e.g.
    /// `Archive` to `ArchivePublic`.
    pub fn reproject(&self, schema: Schema) -> Table {
        Table::from_rows(schema, self.rows.iter().cloned())
    }

    /// Group rows by meeting, newest meeting first
    pub fn group_by_meeting(&self) -> Vec<MeetingGroup> {
        group_by_meeting(&self.rows)
    }

    /// One `participant (email)` line per distinct submitter, sorted
    pub fn submitter_roster(&self) -> Vec<String> {
        submitter_roster(&self.rows)
    }

    /// Emails of every pending submission, to select them all for review
    pub fn pending_emails(&self) -> IndexSet<String> {
        pending_emails(&self.rows)
    }

    /// Serialize the table to CSV text
    pub fn to_csv_string(&self) -> Result<String> {
        crate::csv::to_csv_string(&self.rows, self.schema)
    }

    /// Iterate over rows
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Iterate over rows mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.iter_mut()
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a mut Table {
    type Item = &'a mut Row;
    type IntoIter = std::slice::IterMut<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter_mut()
    }
}
