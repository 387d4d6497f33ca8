//! Instance adapter: normalized create/list/get/destroy over a compute session.
//!
//! Every read path reshapes provider droplets through
//! [`to_normalized_instance`], so create, list, and get agree on field
//! mapping. Create returns whatever the provider echoes immediately, which
//! usually means no addresses yet; callers wanting live networking must
//! re-fetch with [`InstanceAdapter::get`].

use tracing::debug;

use crate::backend::{ComputeApi, InstanceCreateRequest, MAX_PAGE_SIZE, Page, PageRequest};
use crate::digitalocean::DigitalOceanApi;
use crate::digitalocean::wire::{DropletCreatePayload, UpstreamDroplet, UpstreamNetwork};
use crate::domain::{Droplet, Instance, NetworkInterface, Networks};
use crate::types::{AccessToken, DropletId};

const PRIVATE_NETWORKING_FEATURE: &str = "private_networking";

/// Normalizing adapter around a [`ComputeApi`] session.
#[derive(Clone, Debug)]
pub struct InstanceAdapter<A> {
    api: A,
    page_size: u32,
}

impl InstanceAdapter<DigitalOceanApi> {
    /// Opens a DigitalOcean session for `token` and wraps it.
    #[must_use]
    pub fn for_token(token: AccessToken) -> Self {
        Self::new(DigitalOceanApi::new(token))
    }
}

impl<A: ComputeApi> InstanceAdapter<A> {
    /// Wraps an existing session, listing with the largest page size.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self {
            api,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Overrides the page size used by [`Self::list`].
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = PageRequest::first(page_size).per_page;
        self
    }

    /// Returns the wrapped session.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Creates a droplet from `request`.
    ///
    /// # Errors
    ///
    /// Returns the session's error unchanged when the provider call fails.
    pub async fn create(&self, request: &InstanceCreateRequest) -> Result<Instance, A::Error> {
        let payload = to_create_payload(request);
        let created = self.api.create(&payload).await?;
        debug!(droplet_id = created.id, "droplet created");
        let mut instance = to_normalized_instance(&created);
        instance.droplet.ssh_keys.clone_from(&request.ssh_keys);
        Ok(instance)
    }

    /// Fetches a single page of instances.
    ///
    /// # Errors
    ///
    /// Returns the session's error unchanged when the provider call fails.
    pub async fn list_page(&self, page: PageRequest) -> Result<Page<Instance>, A::Error> {
        let upstream = self.api.list(page).await?;
        Ok(upstream.map(|droplet| to_normalized_instance(&droplet)))
    }

    /// Fetches every instance visible to the session, following pagination.
    ///
    /// # Errors
    ///
    /// Returns the session's error unchanged when any page fails; no partial
    /// result is returned.
    pub async fn list(&self) -> Result<Vec<Instance>, A::Error> {
        let mut request = PageRequest::first(self.page_size);
        let mut instances = Vec::new();
        loop {
            let page = self.list_page(request).await?;
            instances.extend(page.items);
            match page.next_page {
                Some(next) if next > request.page => request = request.at(next),
                _ => break,
            }
        }
        debug!(count = instances.len(), "listed droplets");
        Ok(instances)
    }

    /// Fetches a single instance with its full network configuration.
    ///
    /// # Errors
    ///
    /// Returns the session's error unchanged, including the provider's
    /// not-found error for unknown identifiers.
    pub async fn get(&self, id: DropletId) -> Result<Instance, A::Error> {
        let droplet = self.api.get(id).await?;
        Ok(to_normalized_instance(&droplet))
    }

    /// Requests deletion of an instance without waiting for teardown.
    ///
    /// # Errors
    ///
    /// Returns the session's error unchanged when the provider call fails.
    pub async fn destroy(&self, id: DropletId) -> Result<(), A::Error> {
        self.api.delete(id).await
    }
}

/// Maps a create request onto the provider payload field by field.
#[must_use]
pub fn to_create_payload(request: &InstanceCreateRequest) -> DropletCreatePayload {
    DropletCreatePayload {
        name: request.name.clone(),
        region: request.region.clone(),
        size: request.size.clone(),
        image: request.image.clone(),
        ssh_keys: request
            .ssh_keys
            .iter()
            .map(|key| key.fingerprint.clone())
            .collect(),
        backups: request.backups,
        ipv6: request.ipv6,
        private_networking: request.private_networking,
        user_data: Some(request.user_data.clone()).filter(|data| !data.is_empty()),
    }
}

/// Reshapes a provider droplet into the normalized [`Instance`].
///
/// SSH keys are left empty because the provider does not report them.
#[must_use]
pub fn to_normalized_instance(droplet: &UpstreamDroplet) -> Instance {
    Instance::digital_ocean(Droplet {
        id: droplet.id,
        name: droplet.name.clone(),
        region: droplet.region.slug.clone(),
        operating_system: droplet.image.slug.clone().unwrap_or_default(),
        private_networking: droplet.has_feature(PRIVATE_NETWORKING_FEATURE),
        instance_name: droplet.size_slug().to_owned(),
        networks: Networks {
            v4: to_network_interfaces(&droplet.networks.v4),
            v6: to_network_interfaces(&droplet.networks.v6),
        },
        ssh_keys: Vec::new(),
    })
}

/// Reshapes provider address entries, preserving order and every field.
#[must_use]
pub fn to_network_interfaces(networks: &[UpstreamNetwork]) -> Vec<NetworkInterface> {
    networks
        .iter()
        .map(|network| NetworkInterface {
            ip_address: network.ip_address.clone(),
            netmask: network.netmask.to_string(),
            gateway: network.gateway.clone(),
            kind: network.kind.clone(),
        })
        .collect()
}
