//! The module contains the errors the engine can report.
//!
//! Backend failures fall in four families:
//!
//! - [`Transport`] the request never got a response.
//! - [`Decode`] the response body was not the expected JSON.
//! - [`Status`] the backend answered with a non-success status.
//! - [`Rejected`] the backend answered with an `{error}` payload.
//!
//!  [`Transport`]: EngineError::Transport
//!  [`Decode`]: EngineError::Decode
//!  [`Status`]: EngineError::Status
//!  [`Rejected`]: EngineError::Rejected
use thiserror::Error;

/// Message shown in place of the dashboard when a cycle fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data. Please try again.";

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("{status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("state store error: {0}")]
    Storage(String),
    #[error("missing {0}")]
    Builder(&'static str),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
