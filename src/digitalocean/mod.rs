//! DigitalOcean implementation of the compute API seam.

mod error;
mod request;
pub mod wire;

use tracing::debug;

use crate::backend::{BackendFuture, ComputeApi, Page, PageRequest};
use crate::http;
use crate::types::{AccessToken, DropletId};
use wire::{DropletCreatePayload, DropletEnvelope, DropletListEnvelope, UpstreamDroplet};

pub use error::ProviderError;

/// Base URL of the DigitalOcean v2 API.
pub const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// Authenticated session against the DigitalOcean droplet endpoints.
///
/// A session is cheap to clone and shares the process-wide connection pool.
#[derive(Clone, Debug)]
pub struct DigitalOceanApi {
    http: reqwest::Client,
    base: String,
    token: AccessToken,
}

impl DigitalOceanApi {
    /// Opens a session against the public API.
    #[must_use]
    pub fn new(token: AccessToken) -> Self {
        Self::with_base(token, DIGITALOCEAN_API_BASE)
    }

    /// Opens a session against a custom API base, such as a test stub.
    #[must_use]
    pub fn with_base(token: AccessToken, base: impl Into<String>) -> Self {
        let raw: String = base.into();
        Self {
            http: http::client(),
            base: raw.trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Returns the API base this session talks to.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }

    async fn create_droplet(
        &self,
        payload: &DropletCreatePayload,
    ) -> Result<UpstreamDroplet, ProviderError> {
        debug!(name = %payload.name, region = %payload.region, "creating droplet");
        let builder = self
            .http
            .post(self.url("droplets"))
            .bearer_auth(self.token.expose())
            .json(payload);
        let envelope: DropletEnvelope = request::send_json(builder).await?;
        Ok(envelope.droplet)
    }

    async fn list_droplets(
        &self,
        page: PageRequest,
    ) -> Result<Page<UpstreamDroplet>, ProviderError> {
        debug!(page = page.page, per_page = page.per_page, "listing droplets");
        let builder = self
            .http
            .get(self.url("droplets"))
            .bearer_auth(self.token.expose())
            .query(&[("page", page.page), ("per_page", page.per_page)]);
        let envelope: DropletListEnvelope = request::send_json(builder).await?;
        let next_page = envelope
            .links
            .pages
            .next
            .as_deref()
            .and_then(request::page_number);
        Ok(Page {
            items: envelope.droplets,
            next_page,
            total: envelope.meta.total,
        })
    }

    async fn get_droplet(&self, id: DropletId) -> Result<UpstreamDroplet, ProviderError> {
        debug!(droplet_id = %id, "fetching droplet");
        let builder = self
            .http
            .get(self.url(&format!("droplets/{id}")))
            .bearer_auth(self.token.expose());
        let envelope: DropletEnvelope = request::send_json(builder).await?;
        Ok(envelope.droplet)
    }

    async fn delete_droplet(&self, id: DropletId) -> Result<(), ProviderError> {
        debug!(droplet_id = %id, "deleting droplet");
        let builder = self
            .http
            .delete(self.url(&format!("droplets/{id}")))
            .bearer_auth(self.token.expose());
        request::send_empty(builder).await
    }
}

impl ComputeApi for DigitalOceanApi {
    type Error = ProviderError;

    fn create<'a>(
        &'a self,
        payload: &'a DropletCreatePayload,
    ) -> BackendFuture<'a, UpstreamDroplet, Self::Error> {
        Box::pin(self.create_droplet(payload))
    }

    fn list(&self, page: PageRequest) -> BackendFuture<'_, Page<UpstreamDroplet>, Self::Error> {
        Box::pin(self.list_droplets(page))
    }

    fn get(&self, id: DropletId) -> BackendFuture<'_, UpstreamDroplet, Self::Error> {
        Box::pin(self.get_droplet(id))
    }

    fn delete(&self, id: DropletId) -> BackendFuture<'_, (), Self::Error> {
        Box::pin(self.delete_droplet(id))
    }
}
