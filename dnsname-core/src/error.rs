//! Error - Failures of the fallible name helpers
//!
//! Normalizers never fail; only parsing of composite identifiers and
//! loading of attribute documents can.

/// Error type for name helpers
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    #[error("Invalid record ID '{id}': {reason}")]
    InvalidRecordId { id: String, reason: String },

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Expected a JSON object of attributes, got {0}")]
    NotAnAttributeMap(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NameError {
    pub fn invalid_record_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        NameError::InvalidRecordId {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type NameResult<T> = Result<T, NameError>;
