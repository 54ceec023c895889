//! Row implementation for submission tables

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::column::Column;
use crate::schema::Schema;

/// A single submission (row) keyed by column
///
/// Values are always text, a `year` of `2024` stays the string `"2024"`.
/// Two rows are equal when they hold the same values for the same columns,
/// whatever order the columns were inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    data: IndexMap<Column, String>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Self {
            data: IndexMap::new(),
        }
    }

    /// Create a row with pre-allocated capacity
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: IndexMap::with_capacity(capacity),
        }
    }

    /// Build a row from `(name, value)` pairs, dropping names that are not a known column
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = Row::new();
        for (name, value) in pairs {
            let name: &str = name.as_ref();
            match Column::from_name(name) {
                Some(column) => row.set(column, value),
                None => debug!(column = name, "dropping unknown column"),
            }
        }
        row
    }

    /// Get a value, if the column is present
    pub fn get(&self, column: Column) -> Option<&str> {
        self.data.get(&column).map(String::as_str)
    }

    /// Get a value, treating an absent column as the empty string
    pub fn value(&self, column: Column) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Set a value
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.data.insert(column, value.into());
    }

    /// Builder-style variant of [`Row::set`]
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Remove a column, returning its value
    pub fn remove(&mut self, column: Column) -> Option<String> {
        self.data.shift_remove(&column)
    }

    /// Check if this row contains a column
    pub fn contains(&self, column: Column) -> bool {
        self.data.contains_key(&column)
    }

    /// Get the number of columns in this row
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if this row is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over column-value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Column, &str)> {
        self.data.iter().map(|(column, value)| (*column, value.as_str()))
    }

    /// Columns present in this row, in insertion order
    pub fn columns(&self) -> impl Iterator<Item = Column> {
        self.data.keys().copied()
    }

    /// Project this row onto a schema
    ///
    /// The result holds exactly the schema's columns, in schema order.
    /// Columns outside the schema are discarded and missing ones are set to
    /// the empty string.
    pub fn project(&self, schema: Schema) -> Row {
        let mut row = Row::with_capacity(schema.len());
        for &column in schema.columns() {
            row.set(column, self.value(column));
        }
        row
    }

    /// Values of the schema's columns, in schema order
    pub fn values_for(&self, schema: Schema) -> impl Iterator<Item = &str> {
        schema.columns().iter().map(|column| self.value(*column))
    }

    /// Check the `status` column against a status name, ignoring ASCII case
    pub fn status_is(&self, status: &str) -> bool {
        self.value(Column::Status).eq_ignore_ascii_case(status)
    }

    /// Whether the slides column holds a link
    pub fn has_slides(&self) -> bool {
        self.value(Column::Slides).starts_with("http")
    }
}

impl FromIterator<(Column, String)> for Row {
    fn from_iter<T: IntoIterator<Item = (Column, String)>>(iter: T) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// Project every row onto a schema, keeping row order
pub fn normalize_rows(rows: &[Row], schema: Schema) -> Vec<Row> {
    rows.iter().map(|row| row.project(schema)).collect()
}

/// Render a loosely typed JSON value as cell text
///
/// Null becomes the empty string, strings are taken as-is and anything else
/// is rendered to its JSON text.
pub(crate) fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (column, value) in &self.data {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object keyed by column name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
        let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            match Column::from_name(&name) {
                Some(column) => row.set(column, cell_text(value)),
                None => debug!(column = %name, "dropping unknown column"),
            }
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}
