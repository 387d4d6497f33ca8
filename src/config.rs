//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::backend::MAX_PAGE_SIZE;
use crate::digitalocean::{DIGITALOCEAN_API_BASE, DigitalOceanApi};
use crate::oauth::{DIGITALOCEAN_OAUTH_BASE, OAuthClient, OAuthEndpoints, OAuthError};
use crate::types::AccessToken;

/// Adapter configuration derived from environment variables, configuration
/// files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "DO")]
pub struct AdapterConfig {
    /// Personal access or OAuth token used for droplet calls.
    pub access_token: Option<String>,
    /// OAuth application client identifier.
    pub client_id: Option<String>,
    /// OAuth application client secret.
    pub client_secret: Option<String>,
    /// Redirect URI registered for the OAuth application.
    pub redirect_uri: Option<String>,
    /// Droplet API base. Defaults to the public v2 API.
    #[ortho_config(default = DIGITALOCEAN_API_BASE.to_owned())]
    pub api_base: String,
    /// OAuth endpoint base. Defaults to the public OAuth service.
    #[ortho_config(default = DIGITALOCEAN_OAUTH_BASE.to_owned())]
    pub oauth_base: String,
    /// Page size for droplet listings, capped at 200 by the provider.
    #[ortho_config(default = 200)]
    pub page_size: u32,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, key: &'static str) -> Self {
        Self {
            description,
            env_var,
            key,
        }
    }
}

const ACCESS_TOKEN: FieldMetadata =
    FieldMetadata::new("DigitalOcean access token", "DO_ACCESS_TOKEN", "access_token");
const CLIENT_ID: FieldMetadata =
    FieldMetadata::new("OAuth client ID", "DO_CLIENT_ID", "client_id");
const CLIENT_SECRET: FieldMetadata =
    FieldMetadata::new("OAuth client secret", "DO_CLIENT_SECRET", "client_secret");
const REDIRECT_URI: FieldMetadata =
    FieldMetadata::new("OAuth redirect URI", "DO_REDIRECT_URI", "redirect_uri");

/// Settings needed to build an authorization URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OAuthRedirect {
    /// Client identifier.
    pub client_id: String,
    /// Registered redirect URI.
    pub redirect_uri: String,
}

/// OAuth application settings after validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OAuthApp {
    /// Client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
    /// Registered redirect URI.
    pub redirect_uri: String,
}

impl AdapterConfig {
    fn require_field<'a>(
        value: Option<&'a str>,
        metadata: &FieldMetadata,
    ) -> Result<&'a str, ConfigError> {
        match value.map(str::trim) {
            Some(found) if !found.is_empty() => Ok(found),
            _ => Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to the configuration file",
                metadata.description, metadata.env_var, metadata.key
            ))),
        }
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables in that
    /// order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("droplet-adapter")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks the fields droplet commands need.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the access token is absent.
    pub fn validate_compute(&self) -> Result<(), ConfigError> {
        Self::require_field(self.access_token.as_deref(), &ACCESS_TOKEN).map(|_| ())
    }

    /// Checks and returns the fields the authorization URL needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for the first absent field.
    pub fn validate_oauth_redirect(&self) -> Result<OAuthRedirect, ConfigError> {
        Ok(OAuthRedirect {
            client_id: Self::require_field(self.client_id.as_deref(), &CLIENT_ID)?.to_owned(),
            redirect_uri: Self::require_field(self.redirect_uri.as_deref(), &REDIRECT_URI)?
                .to_owned(),
        })
    }

    /// Checks and returns the fields the token exchange needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for the first absent field.
    pub fn validate_oauth(&self) -> Result<OAuthApp, ConfigError> {
        let redirect = self.validate_oauth_redirect()?;
        let client_secret =
            Self::require_field(self.client_secret.as_deref(), &CLIENT_SECRET)?.to_owned();
        Ok(OAuthApp {
            client_id: redirect.client_id,
            client_secret,
            redirect_uri: redirect.redirect_uri,
        })
    }

    /// Opens a droplet API session from the configured token and base.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the access token is absent.
    pub fn compute_session(&self) -> Result<DigitalOceanApi, ConfigError> {
        let token = Self::require_field(self.access_token.as_deref(), &ACCESS_TOKEN)?;
        Ok(DigitalOceanApi::with_base(
            AccessToken::new(token),
            self.api_base.as_str(),
        ))
    }

    /// Builds an OAuth client for the configured base.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `oauth_base` is not a URL.
    pub fn oauth_client(&self) -> Result<OAuthClient, ConfigError> {
        let endpoints = OAuthEndpoints::from_base(&self.oauth_base)?;
        Ok(OAuthClient::new(endpoints))
    }

    /// Returns the list page size clamped to what the provider accepts.
    #[must_use]
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader or malformed values.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<OAuthError> for ConfigError {
    fn from(value: OAuthError) -> Self {
        Self::Parse(value.to_string())
    }
}
