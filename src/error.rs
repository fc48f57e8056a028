//! StringLens error types

use thiserror::Error;

/// StringLens error type
#[derive(Error, Debug)]
pub enum Error {
    /// A required input field was absent (or null)
    #[error("Missing required field '{0}'")]
    MissingField(String),

    /// A field was present but had the wrong type
    #[error("Field '{field}' must be a {expected}")]
    TypeMismatch { field: String, expected: String },

    /// The value has already been analyzed and stored
    #[error("String already exists in the system")]
    DuplicateValue,

    /// Derived filters contradict each other
    #[error("Conflicting filters: {0}")]
    ConflictingFilters(String),

    /// No record matched
    #[error("{0}")]
    NotFound(String),

    /// No pattern rule recognized anything in the query
    #[error("Unable to parse natural language query '{0}': no recognizable filters found")]
    UnparseableQuery(String),

    /// A raw filter parameter could not be coerced
    #[error("Invalid value for {field}: {reason}")]
    InvalidFilterValue { field: String, reason: String },

    /// Request body could not be read as JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Both conflict kinds: a duplicate value or contradictory bounds
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateValue | Self::ConflictingFilters(_))
    }

    pub(crate) fn invalid_filter(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for StringLens operations
pub type Result<T> = std::result::Result<T, Error>;
