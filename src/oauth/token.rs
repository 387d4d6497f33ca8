//! Token response bodies from the DigitalOcean OAuth endpoint.

use serde::{Deserialize, Serialize};

/// Access token issued by the authorization server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OAuthToken {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token type, normally `bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Token used to obtain a fresh access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: Option<String>,
    /// Account the token was issued for.
    #[serde(default)]
    pub info: Option<TokenInfo>,
}

/// Account details DigitalOcean attaches to a token.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TokenInfo {
    /// Account display name.
    #[serde(default)]
    pub name: String,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Account UUID.
    #[serde(default)]
    pub uuid: String,
}

/// Error body from the token endpoint. Absent fields decode as empty.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(super) struct TokenErrorBody {
    #[serde(default)]
    pub(super) error: String,
    #[serde(default)]
    pub(super) error_description: String,
}

impl TokenErrorBody {
    /// Decodes best-effort; an unreadable body yields empty fields.
    pub(super) fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
