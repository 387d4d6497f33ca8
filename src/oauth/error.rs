//! Error types for the OAuth adapter.

use thiserror::Error;

/// Errors raised by the OAuth authorization-code flow.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum OAuthError {
    /// Raised when an endpoint URL cannot be parsed.
    #[error("invalid OAuth endpoint: {0}")]
    Endpoint(String),
    /// Raised when the token request never produced a response.
    #[error("token request failed: {0}")]
    Transport(String),
    /// Raised for any non-200 token response. The provider's error code is
    /// logged, not carried.
    #[error("cannot create token")]
    TokenRejected,
    /// Raised when a 200 response body is not a token.
    #[error("failed to decode token response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for OAuthError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl From<url::ParseError> for OAuthError {
    fn from(value: url::ParseError) -> Self {
        Self::Endpoint(value.to_string())
    }
}
