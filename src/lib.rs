//! Core library for the droplet adapter.
//!
//! The crate exposes a thin, normalizing boundary over the DigitalOcean
//! droplet API (create → list → get → destroy) and the DigitalOcean OAuth2
//! authorization-code flow. Provider payloads are reshaped into the
//! provider-agnostic [`Instance`] record; nothing is cached or retried.

pub mod backend;
pub mod config;
pub mod digitalocean;
pub mod domain;
mod http;
pub mod instances;
pub mod oauth;
#[cfg(test)]
pub mod test_helpers;
pub mod test_support;
pub mod types;

pub use backend::{
    ComputeApi, InstanceCreateRequest, InstanceCreateRequestBuilder, Page, PageRequest,
};
pub use config::{AdapterConfig, ConfigError, OAuthApp, OAuthRedirect};
pub use digitalocean::{DigitalOceanApi, ProviderError};
pub use domain::{DIGITAL_OCEAN_PROVIDER, Droplet, Instance, NetworkInterface, Networks, SshKey};
pub use http::HTTP_TIMEOUT;
pub use instances::{InstanceAdapter, to_normalized_instance};
pub use oauth::{OAuthClient, OAuthEndpoints, OAuthError, OAuthToken, build_authorization_url};
pub use types::{AccessToken, DropletId};
