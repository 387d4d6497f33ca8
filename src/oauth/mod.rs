//! OAuth2 authorization-code flow against DigitalOcean.
//!
//! [`build_authorization_url`] produces the browser redirect target and
//! [`OAuthClient::exchange_code_for_token`] trades the returned code for an
//! access token. Token rejections collapse into
//! [`OAuthError::TokenRejected`]; the provider's error code and description
//! only reach the logs.

mod error;
mod token;

use tracing::{debug, warn};
use url::Url;

use crate::http;

pub use error::OAuthError;
pub use token::{OAuthToken, TokenInfo};
use token::TokenErrorBody;

/// Base URL of the DigitalOcean OAuth endpoints.
pub const DIGITALOCEAN_OAUTH_BASE: &str = "https://cloud.digitalocean.com/v1/oauth";

const AUTHORIZE_PATH: &str = "authorize";
const TOKEN_PATH: &str = "token";

/// Authorization and token endpoint URLs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OAuthEndpoints {
    /// Browser redirect target.
    pub authorize: Url,
    /// Server-to-server token exchange URL.
    pub token: Url,
}

impl OAuthEndpoints {
    /// Returns the public DigitalOcean endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Endpoint`] only if the built-in base stops
    /// parsing, which would be a programming error.
    pub fn digitalocean() -> Result<Self, OAuthError> {
        Self::from_base(DIGITALOCEAN_OAUTH_BASE)
    }

    /// Derives both endpoints from a base URL such as
    /// `https://cloud.digitalocean.com/v1/oauth`.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Endpoint`] when `base` is not an absolute URL.
    pub fn from_base(base: &str) -> Result<Self, OAuthError> {
        let root = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;
        Ok(Self {
            authorize: root.join(AUTHORIZE_PATH)?,
            token: root.join(TOKEN_PATH)?,
        })
    }
}

/// Builds the authorization URL a user is redirected to.
///
/// Appends exactly `client_id`, `redirect_uri`, `scope` (space joined, in
/// input order), and `response_type=code`. Inputs are not validated.
#[must_use]
pub fn build_authorization_url<S: AsRef<str>>(
    authorize: &Url,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[S],
) -> String {
    let scope = scopes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    let mut url = authorize.clone();
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", &scope)
        .append_pair("response_type", "code");
    url.into()
}

/// Client for the token endpoint.
#[derive(Clone, Debug)]
pub struct OAuthClient {
    http: reqwest::Client,
    endpoints: OAuthEndpoints,
}

impl OAuthClient {
    /// Creates a client for the given endpoints.
    #[must_use]
    pub fn new(endpoints: OAuthEndpoints) -> Self {
        Self {
            http: http::client(),
            endpoints,
        }
    }

    /// Builds the authorization URL against this client's authorize endpoint.
    #[must_use]
    pub fn authorization_url<S: AsRef<str>>(
        &self,
        client_id: &str,
        redirect_uri: &str,
        scopes: &[S],
    ) -> String {
        build_authorization_url(&self.endpoints.authorize, client_id, redirect_uri, scopes)
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// The exchange parameters travel in the query string of an empty POST.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Transport`] when the request cannot be sent,
    /// [`OAuthError::TokenRejected`] for any non-200 status, and
    /// [`OAuthError::Decode`] when a 200 body is not a token.
    pub async fn exchange_code_for_token(
        &self,
        code: &str,
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
    ) -> Result<OAuthToken, OAuthError> {
        debug!(token_url = %self.endpoints.token, "exchanging authorization code");
        let response = self
            .http
            .post(self.endpoints.token.clone())
            .query(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status != reqwest::StatusCode::OK {
            let rejection = TokenErrorBody::from_slice(&body);
            warn!(
                status = status.as_u16(),
                error = %rejection.error,
                error_description = %rejection.error_description,
                "OAuth token exchange rejected"
            );
            return Err(OAuthError::TokenRejected);
        }

        serde_json::from_slice(&body).map_err(|err| OAuthError::Decode(err.to_string()))
    }
}
