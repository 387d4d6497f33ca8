//! Error types for the DigitalOcean compute client.

use thiserror::Error;

const NOT_FOUND: u16 = 404;

/// Errors raised while talking to the DigitalOcean API.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProviderError {
    /// Raised when the request never produced a response.
    #[error("transport error: {message}")]
    Transport {
        /// Message from the HTTP client.
        message: String,
    },
    /// Raised when the provider answers with a non-success status.
    #[error("provider error ({status}): {id}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider error identifier (for example `not_found`).
        id: String,
        /// Provider message, or the raw body when it was not JSON.
        message: String,
    },
    /// Raised when a success body cannot be decoded.
    #[error("failed to decode provider response: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
}

impl ProviderError {
    /// Reports whether the provider said the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == NOT_FOUND)
    }

    /// Builds the error returned for a missing droplet.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Api {
            status: NOT_FOUND,
            id: String::from("not_found"),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport {
            message: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode {
            message: value.to_string(),
        }
    }
}
