use thiserror::Error;

use crate::column::Column;

/// Result type alias for seminar table operations
pub type Result<T> = std::result::Result<T, SeminarError>;

/// Errors that can occur while reading, writing or converting submission rows
#[derive(Error, Debug)]
pub enum SeminarError {
    /// Column name that is not part of any schema
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Schema name that does not match one of the named schemas
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// Row index out of bounds
    #[error("Row index out of bounds: {index} (len: {len})")]
    RowIndexOutOfBounds { index: usize, len: usize },

    /// A required form field was left empty
    #[error("Missing required field: {0}")]
    MissingField(Column),

    /// The session holds no email verification
    #[error("Please verify your email before attaching slides.")]
    NotVerified,

    /// String decoding error
    #[error("String encoding error: {0}")]
    EncodingError(String),

    /// CSV writing error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote API answered with an error envelope
    #[error("{message}")]
    Api {
        message: String,
        code: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SeminarError {
    /// Machine-readable code attached to an API error, if any
    pub fn api_code(&self) -> Option<&str> {
        match self {
            SeminarError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<csv::Error> for SeminarError {
    fn from(err: csv::Error) -> Self {
        SeminarError::CsvError(err.to_string())
    }
}

impl<W> From<csv::IntoInnerError<W>> for SeminarError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        SeminarError::CsvError(err.error().to_string())
    }
}
