//! Backend abstraction over an upstream compute API.
//!
//! [`ComputeApi`] is the seam between the instance adapter and whichever
//! client talks to the provider. The production implementation is
//! [`crate::DigitalOceanApi`]; tests substitute [`crate::test_support::FakeCompute`].

use std::future::Future;
use std::pin::Pin;

use crate::digitalocean::wire::{DropletCreatePayload, UpstreamDroplet};
use crate::domain::SshKey;
use crate::types::DropletId;

/// Largest page size accepted by the DigitalOcean list endpoints.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Parameters required to create a new instance.
///
/// Every field is passed through to the provider untouched; validation is the
/// provider's job.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InstanceCreateRequest {
    /// Droplet name (for example `web-01`).
    pub name: String,
    /// Region slug (for example `nyc3`).
    pub region: String,
    /// Size slug (for example `s-1vcpu-1gb`).
    pub size: String,
    /// Enables automated backups.
    pub backups: bool,
    /// Enables IPv6 networking.
    pub ipv6: bool,
    /// Enables private networking.
    pub private_networking: bool,
    /// Free-form user data passed to cloud-init.
    pub user_data: String,
    /// Image slug (for example `ubuntu-24-04-x64`).
    pub image: String,
    /// SSH keys to embed, in caller order.
    pub ssh_keys: Vec<SshKey>,
}

impl InstanceCreateRequest {
    /// Starts a builder for an [`InstanceCreateRequest`].
    #[must_use]
    pub fn builder() -> InstanceCreateRequestBuilder {
        InstanceCreateRequestBuilder::new()
    }
}

/// Builder for [`InstanceCreateRequest`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InstanceCreateRequestBuilder {
    request: InstanceCreateRequest,
}

impl InstanceCreateRequestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the droplet name.
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.request.name = value.into();
        self
    }

    /// Sets the region slug.
    #[must_use]
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.request.region = value.into();
        self
    }

    /// Sets the size slug.
    #[must_use]
    pub fn size(mut self, value: impl Into<String>) -> Self {
        self.request.size = value.into();
        self
    }

    /// Toggles automated backups.
    #[must_use]
    pub const fn backups(mut self, value: bool) -> Self {
        self.request.backups = value;
        self
    }

    /// Toggles IPv6.
    #[must_use]
    pub const fn ipv6(mut self, value: bool) -> Self {
        self.request.ipv6 = value;
        self
    }

    /// Toggles private networking.
    #[must_use]
    pub const fn private_networking(mut self, value: bool) -> Self {
        self.request.private_networking = value;
        self
    }

    /// Sets the user data.
    #[must_use]
    pub fn user_data(mut self, value: impl Into<String>) -> Self {
        self.request.user_data = value.into();
        self
    }

    /// Sets the image slug.
    #[must_use]
    pub fn image(mut self, value: impl Into<String>) -> Self {
        self.request.image = value.into();
        self
    }

    /// Appends an SSH key by fingerprint.
    #[must_use]
    pub fn ssh_key(mut self, fingerprint: impl Into<String>) -> Self {
        self.request.ssh_keys.push(SshKey::new(fingerprint));
        self
    }

    /// Appends several SSH keys by fingerprint, preserving order.
    #[must_use]
    pub fn ssh_keys<I, S>(mut self, fingerprints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request
            .ssh_keys
            .extend(fingerprints.into_iter().map(SshKey::new));
        self
    }

    /// Finishes the request.
    #[must_use]
    pub fn build(self) -> InstanceCreateRequest {
        self.request
    }
}

/// Page selector for list calls. Pages are 1-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Number of entries per page.
    pub per_page: u32,
}

impl PageRequest {
    /// Selects the first page with the given size, clamped to
    /// `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Selects another page with the same size. Page numbers start at 1,
    /// so 0 selects the first page.
    #[must_use]
    pub fn at(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: self.per_page,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(MAX_PAGE_SIZE)
    }
}

/// One page of results plus the cursor for the next one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Entries on this page.
    pub items: Vec<T>,
    /// Number of the following page, when the provider reports one.
    pub next_page: Option<u32>,
    /// Total number of entries across all pages, when reported.
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Maps each entry while keeping the paging cursor.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page: self.next_page,
            total: self.total,
        }
    }
}

/// Future returned by backend operations.
pub type BackendFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Minimal interface implemented by compute API clients.
pub trait ComputeApi {
    /// Provider specific error type returned by the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submits a droplet creation request.
    fn create<'a>(
        &'a self,
        payload: &'a DropletCreatePayload,
    ) -> BackendFuture<'a, UpstreamDroplet, Self::Error>;

    /// Fetches one page of droplets visible to the session.
    fn list(&self, page: PageRequest) -> BackendFuture<'_, Page<UpstreamDroplet>, Self::Error>;

    /// Fetches a single droplet.
    fn get(&self, id: DropletId) -> BackendFuture<'_, UpstreamDroplet, Self::Error>;

    /// Requests deletion of a droplet. Does not wait for teardown.
    fn delete(&self, id: DropletId) -> BackendFuture<'_, (), Self::Error>;
}
