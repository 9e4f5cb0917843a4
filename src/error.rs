use thiserror::Error;

pub(crate) const NETWORK_ERROR: &str = "Network error";

/// The single error kind callers of the pipeline see.
///
/// Only a human readable message is kept. Status codes and server error codes
/// are not carried; a caller needing them has to talk to the transport
/// directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailure {
    message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> RequestFailure {
        let message = message.into();
        if message.is_empty() {
            return RequestFailure {
                message: NETWORK_ERROR.to_string(),
            };
        }
        RequestFailure { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A call that never produced an HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> TransportError {
        TransportError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError::new(error.to_string())
    }
}
