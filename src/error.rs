//! Error type shared by every client operation.

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong talking to a controller.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never got a response: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The controller answered 200 but the body was not what we expected.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No zone with this id is known locally.
    #[error("zone {0} not found")]
    NotFound(i64),

    /// The controller rejected the request.
    #[error(
        "failed to {operation} ({status}){}",
        .payload.as_ref().map(|p| format!(". Payload: {}", p)).unwrap_or_default()
    )]
    Operation {
        operation: String,
        status: StatusCode,
        payload: Option<String>,
    },

    /// The settings file could not be read or written.
    #[error("configuration error: {0}")]
    Config(#[from] confy::ConfyError),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn operation(operation: impl Into<String>, status: StatusCode) -> Error {
        Error::Operation {
            operation: operation.into(),
            status,
            payload: None,
        }
    }

    /// The status code the controller answered with, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Operation { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }
}
