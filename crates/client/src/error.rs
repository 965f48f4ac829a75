use thiserror::Error;

use crate::form::FieldError;

/// Failure of a catalog operation. `Display` is the human-readable text
/// shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rejected: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid base url {0}")]
    InvalidBaseUrl(String),

    #[error("invalid product: {}", describe_fields(.0))]
    InvalidForm(Vec<FieldError>),
}

impl ClientError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
