//! Decoding of the remote sheet API's JSON answers
//!
//! Every answer is an envelope with an `ok` flag. Failed answers carry a
//! human-readable `message` and sometimes a machine-readable `code` (for
//! example `duplicate` when a participant already submitted for a meeting).

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Result, SeminarError};
use crate::row::{Row, cell_text, normalize_rows};
use crate::schema::Schema;
use crate::table::Table;

const REQUEST_FAILED: &str = "Request failed.";

/// A successful API answer
///
/// The sheet is not strict about types, so every field is read loosely:
/// `ok` by truthiness, text fields coerced from numbers or booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub ok: bool,
    pub message: Option<String>,
    pub code: Option<String>,
    /// Rows as sent by the sheet, with whatever columns it had
    pub rows: Option<Vec<Row>>,
    /// Next meeting date, answered to `nextMeeting`
    pub meeting: Option<String>,
    /// Submission status, answered to `userStatus`
    pub status: Option<String>,
    /// Token issued once an email verification code is confirmed
    pub session_token: Option<String>,
}

impl ApiResponse {
    /// Decode a response body
    ///
    /// # Errors
    /// - `SeminarError::Api` if the body is not JSON (the body itself becomes the
    ///   message) or if the envelope is not `ok`
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            warn!("API answered with a body that is not JSON: {e}");
            let message = if body.trim().is_empty() {
                REQUEST_FAILED.to_string()
            } else {
                body.to_string()
            };
            SeminarError::Api {
                message,
                code: None,
            }
        })?;

        let response = ApiResponse::from_value(value);
        if !response.ok {
            warn!(code = ?response.code, "API request failed");
            return Err(SeminarError::Api {
                message: response
                    .message
                    .unwrap_or_else(|| REQUEST_FAILED.to_string()),
                code: response.code,
            });
        }

        Ok(response)
    }

    /// Read an envelope from parsed JSON
    ///
    /// Anything that is not an object reads as an empty, failed envelope.
    /// Row entries that are not objects become empty rows.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut envelope) = value else {
            warn!("API answered with JSON that is not an object");
            return ApiResponse::default();
        };

        let rows = match envelope.remove("rows") {
            Some(Value::Array(items)) => Some(items.into_iter().map(row_from_value).collect()),
            Some(other) if is_truthy(&other) => {
                warn!("ignoring API rows that are not a list");
                None
            }
            _ => None,
        };

        ApiResponse {
            ok: envelope.get("ok").is_some_and(is_truthy),
            message: text_field(&mut envelope, "message"),
            code: text_field(&mut envelope, "code"),
            rows,
            meeting: text_field(&mut envelope, "meeting"),
            status: text_field(&mut envelope, "status"),
            session_token: text_field(&mut envelope, "sessionToken"),
        }
    }

    /// The answer's rows projected onto a schema. No rows means an empty list
    pub fn rows(&self, schema: Schema) -> Vec<Row> {
        self.rows
            .as_deref()
            .map(|rows| normalize_rows(rows, schema))
            .unwrap_or_default()
    }

    /// The answer's rows as a table
    pub fn into_table(self, schema: Schema) -> Table {
        Table::from_rows(schema, self.rows.unwrap_or_default())
    }
}

/// JavaScript truthiness, which is what the sheet's answers are written against
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Falsy values count as absent
fn text_field(envelope: &mut Map<String, Value>, key: &str) -> Option<String> {
    envelope
        .remove(key)
        .filter(is_truthy)
        .map(cell_text)
}

fn row_from_value(value: Value) -> Row {
    match value {
        Value::Object(fields) => {
            Row::from_pairs(fields.into_iter().map(|(name, value)| (name, cell_text(value))))
        }
        other => {
            warn!(entry = %other, "API row is not an object, using an empty row");
            Row::new()
        }
    }
}

/// Reword backend messages for display to participants
pub fn friendly_message(message: &str) -> String {
    match message {
        "Email not authorized." => {
            "Email not authorized. Contact the organizers to be added.".to_string()
        }
        "Invalid or expired verification." => {
            "Verification expired. Please verify again.".to_string()
        }
        "Invalid or expired verification code." => {
            "Verification code expired or invalid. Request a new code.".to_string()
        }
        other => other.to_string(),
    }
}
