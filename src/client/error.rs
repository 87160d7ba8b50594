//! Client-side errors

use crate::core::error::FieldValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    /// Rejected by form validation, locally or by the server
    #[error("invalid input: {}", summarize(.0))]
    Invalid(Vec<FieldValidationError>),
}

fn summarize(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ClientError {
    /// The first field message, for a form banner
    pub fn first_message(&self) -> Option<&str> {
        match self {
            ClientError::Invalid(errors) => errors.first().map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
