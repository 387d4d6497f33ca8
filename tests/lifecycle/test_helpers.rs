//! Shared fixtures for lifecycle BDD scenarios.

use droplet_adapter::digitalocean::wire::{UpstreamDroplet, UpstreamImage, UpstreamRegion};
use droplet_adapter::test_support::FakeCompute;
use droplet_adapter::{Instance, ProviderError};
use rstest::fixture;

use crate::test_constants::{DEFAULT_IMAGE, DEFAULT_REGION, DEFAULT_SIZE};

#[derive(Clone, Debug)]
pub struct LifecycleContext {
    pub compute: FakeCompute,
    pub page_size: u32,
    pub fetches: Vec<FetchOutcome>,
    pub destroyed: Option<DestroyOutcome>,
    pub listing: Option<ListOutcome>,
}

#[derive(Clone, Debug)]
pub enum FetchOutcome {
    Found(Instance),
    NotFound,
    Failed(String),
}

impl FetchOutcome {
    pub fn from_result(result: Result<Instance, ProviderError>) -> Self {
        match result {
            Ok(instance) => Self::Found(instance),
            Err(err) if err.is_not_found() => Self::NotFound,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DestroyOutcome {
    Destroyed,
    NotFound,
    Failed(String),
}

impl DestroyOutcome {
    pub fn from_result(result: Result<(), ProviderError>) -> Self {
        match result {
            Ok(()) => Self::Destroyed,
            Err(err) if err.is_not_found() => Self::NotFound,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ListOutcome {
    Listed(Vec<Instance>),
    Failed(String),
}

impl ListOutcome {
    pub fn from_result(result: Result<Vec<Instance>, ProviderError>) -> Self {
        match result {
            Ok(instances) => Self::Listed(instances),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

impl LifecycleContext {
    pub fn seed(&self, id: u64, name: &str) {
        self.compute.insert(UpstreamDroplet {
            id,
            name: name.to_owned(),
            status: String::from("active"),
            region: UpstreamRegion {
                slug: String::from(DEFAULT_REGION),
                name: String::from("New York 3"),
            },
            image: UpstreamImage {
                slug: Some(String::from(DEFAULT_IMAGE)),
                ..UpstreamImage::default()
            },
            size_slug: Some(String::from(DEFAULT_SIZE)),
            ..UpstreamDroplet::default()
        });
    }
}

#[fixture]
pub fn lifecycle_context() -> LifecycleContext {
    LifecycleContext {
        compute: FakeCompute::new(),
        page_size: 200,
        fetches: Vec::new(),
        destroyed: None,
        listing: None,
    }
}
