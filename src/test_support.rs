//! Test support utilities shared across unit and integration tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{BackendFuture, ComputeApi, Page, PageRequest};
use crate::digitalocean::ProviderError;
use crate::digitalocean::wire::{
    DropletCreatePayload, UpstreamDroplet, UpstreamImage, UpstreamRegion, UpstreamSize,
};
use crate::types::DropletId;

const FIRST_FAKE_ID: u64 = 1000;

/// In-memory [`ComputeApi`] that behaves like an account on the provider.
///
/// Created droplets come back without addresses, mirroring the provider's
/// asynchronous IP assignment. Unknown identifiers yield the provider's
/// not-found error.
#[derive(Clone, Debug, Default)]
pub struct FakeCompute {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    droplets: BTreeMap<u64, UpstreamDroplet>,
    created: Vec<DropletCreatePayload>,
    failures: VecDeque<ProviderError>,
    next_id: u64,
    list_calls: usize,
    delete_calls: usize,
}

impl FakeCompute {
    /// Creates an empty account.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a droplet, replacing any existing entry with the same id.
    pub fn insert(&self, droplet: UpstreamDroplet) {
        self.state().droplets.insert(droplet.id, droplet);
    }

    /// Makes the next call fail with `error`. Queued failures are consumed
    /// in order before any call touches the account.
    pub fn fail_next(&self, error: ProviderError) {
        self.state().failures.push_back(error);
    }

    /// Returns the identifiers currently present.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.state().droplets.keys().copied().collect()
    }

    /// Returns every payload passed to create, in call order.
    #[must_use]
    pub fn created_payloads(&self) -> Vec<DropletCreatePayload> {
        self.state().created.clone()
    }

    /// Returns how many list pages were requested.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.state().list_calls
    }

    /// Returns how many delete calls were made.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.state().delete_calls
    }

    fn take_failure(state: &mut State) -> Result<(), ProviderError> {
        state.failures.pop_front().map_or(Ok(()), Err)
    }

    fn create_now(&self, payload: &DropletCreatePayload) -> Result<UpstreamDroplet, ProviderError> {
        let mut state = self.state();
        Self::take_failure(&mut state)?;
        let id = FIRST_FAKE_ID.saturating_add(state.next_id);
        state.next_id = state.next_id.saturating_add(1);

        let mut features = Vec::new();
        if payload.backups {
            features.push(String::from("backups"));
        }
        if payload.ipv6 {
            features.push(String::from("ipv6"));
        }
        if payload.private_networking {
            features.push(String::from("private_networking"));
        }

        let droplet = UpstreamDroplet {
            id,
            name: payload.name.clone(),
            status: String::from("new"),
            region: UpstreamRegion {
                slug: payload.region.clone(),
                name: String::new(),
            },
            image: UpstreamImage {
                id: None,
                slug: Some(payload.image.clone()),
                distribution: None,
            },
            size: UpstreamSize {
                slug: payload.size.clone(),
            },
            size_slug: Some(payload.size.clone()),
            features,
            networks: crate::digitalocean::wire::UpstreamNetworks::default(),
        };
        state.created.push(payload.clone());
        state.droplets.insert(id, droplet.clone());
        Ok(droplet)
    }

    fn list_now(&self, page: PageRequest) -> Result<Page<UpstreamDroplet>, ProviderError> {
        let mut state = self.state();
        state.list_calls = state.list_calls.saturating_add(1);
        Self::take_failure(&mut state)?;

        let per_page = usize::try_from(page.per_page).unwrap_or(usize::MAX);
        let skip = usize::try_from(page.page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(per_page);
        let items: Vec<_> = state
            .droplets
            .values()
            .skip(skip)
            .take(per_page)
            .cloned()
            .collect();
        let remaining = state
            .droplets
            .len()
            .saturating_sub(skip.saturating_add(items.len()));
        Ok(Page {
            items,
            next_page: (remaining > 0).then(|| page.page.saturating_add(1)),
            total: u64::try_from(state.droplets.len()).ok(),
        })
    }

    fn get_now(&self, id: DropletId) -> Result<UpstreamDroplet, ProviderError> {
        let mut state = self.state();
        Self::take_failure(&mut state)?;
        state
            .droplets
            .get(&id.get())
            .cloned()
            .ok_or_else(|| ProviderError::not_found(format!("droplet {id} not found")))
    }

    fn delete_now(&self, id: DropletId) -> Result<(), ProviderError> {
        let mut state = self.state();
        state.delete_calls = state.delete_calls.saturating_add(1);
        Self::take_failure(&mut state)?;
        state
            .droplets
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| ProviderError::not_found(format!("droplet {id} not found")))
    }
}

impl ComputeApi for FakeCompute {
    type Error = ProviderError;

    fn create<'a>(
        &'a self,
        payload: &'a DropletCreatePayload,
    ) -> BackendFuture<'a, UpstreamDroplet, Self::Error> {
        Box::pin(async move { self.create_now(payload) })
    }

    fn list(&self, page: PageRequest) -> BackendFuture<'_, Page<UpstreamDroplet>, Self::Error> {
        Box::pin(async move { self.list_now(page) })
    }

    fn get(&self, id: DropletId) -> BackendFuture<'_, UpstreamDroplet, Self::Error> {
        Box::pin(async move { self.get_now(id) })
    }

    fn delete(&self, id: DropletId) -> BackendFuture<'_, (), Self::Error> {
        Box::pin(async move { self.delete_now(id) })
    }
}
