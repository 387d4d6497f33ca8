//! BDD step definitions for the droplet lifecycle.

use droplet_adapter::test_support::FakeCompute;
use droplet_adapter::{DropletId, InstanceAdapter};
use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;

use super::test_helpers::{DestroyOutcome, FetchOutcome, LifecycleContext, ListOutcome};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
    #[error("failed to start runtime: {0}")]
    Runtime(String),
}

fn adapter(context: &LifecycleContext) -> InstanceAdapter<FakeCompute> {
    InstanceAdapter::new(context.compute.clone()).with_page_size(context.page_size)
}

fn runtime() -> Result<Runtime, StepError> {
    Runtime::new().map_err(|err| StepError::Runtime(err.to_string()))
}

#[given("an empty account")]
fn empty_account(lifecycle_context: LifecycleContext) -> LifecycleContext {
    lifecycle_context
}

#[given("an account holding droplet \"{id}\" named \"{name}\"")]
fn account_with_droplet(
    lifecycle_context: LifecycleContext,
    id: u64,
    name: String,
) -> LifecycleContext {
    lifecycle_context.seed(id, &name);
    lifecycle_context
}

#[given("a page size of \"{size}\"")]
fn page_size(mut lifecycle_context: LifecycleContext, size: u32) -> LifecycleContext {
    lifecycle_context.page_size = size;
    lifecycle_context
}

#[when("I fetch droplet \"{id}\"")]
fn fetch_droplet(
    mut lifecycle_context: LifecycleContext,
    id: u64,
) -> Result<LifecycleContext, StepError> {
    let adapter = adapter(&lifecycle_context);
    let result = runtime()?.block_on(async move { adapter.get(DropletId::new(id)).await });
    lifecycle_context
        .fetches
        .push(FetchOutcome::from_result(result));
    Ok(lifecycle_context)
}

#[when("I destroy droplet \"{id}\"")]
fn destroy_droplet(
    mut lifecycle_context: LifecycleContext,
    id: u64,
) -> Result<LifecycleContext, StepError> {
    let adapter = adapter(&lifecycle_context);
    let result = runtime()?.block_on(async move { adapter.destroy(DropletId::new(id)).await });
    lifecycle_context.destroyed = Some(DestroyOutcome::from_result(result));
    Ok(lifecycle_context)
}

#[when("I list every droplet")]
fn list_droplets(mut lifecycle_context: LifecycleContext) -> Result<LifecycleContext, StepError> {
    let adapter = adapter(&lifecycle_context);
    let result = runtime()?.block_on(async move { adapter.list().await });
    lifecycle_context.listing = Some(ListOutcome::from_result(result));
    Ok(lifecycle_context)
}

#[then("the first fetch returned \"{name}\" tagged \"{provider}\"")]
fn first_fetch_returned(
    lifecycle_context: &LifecycleContext,
    name: String,
    provider: String,
) -> Result<(), StepError> {
    let instance = match lifecycle_context.fetches.first() {
        Some(FetchOutcome::Found(instance)) => instance,
        Some(other) => {
            return Err(StepError::Assertion(format!(
                "expected the first fetch to succeed, got {other:?}"
            )));
        }
        None => return Err(StepError::Assertion(String::from("no fetch recorded"))),
    };
    if instance.droplet.name != name {
        return Err(StepError::Assertion(format!(
            "expected name {name}, got {}",
            instance.droplet.name
        )));
    }
    if instance.provider != provider {
        return Err(StepError::Assertion(format!(
            "expected provider {provider}, got {}",
            instance.provider
        )));
    }
    Ok(())
}

#[then("the destroy succeeded")]
fn destroy_succeeded(lifecycle_context: &LifecycleContext) -> Result<(), StepError> {
    match lifecycle_context.destroyed {
        Some(DestroyOutcome::Destroyed) => Ok(()),
        Some(ref other) => Err(StepError::Assertion(format!(
            "expected destroy to succeed, got {other:?}"
        ))),
        None => Err(StepError::Assertion(String::from("destroy never ran"))),
    }
}

#[then("the destroy reported not found")]
fn destroy_not_found(lifecycle_context: &LifecycleContext) -> Result<(), StepError> {
    match lifecycle_context.destroyed {
        Some(DestroyOutcome::NotFound) => Ok(()),
        Some(ref other) => Err(StepError::Assertion(format!(
            "expected destroy to report not found, got {other:?}"
        ))),
        None => Err(StepError::Assertion(String::from("destroy never ran"))),
    }
}

#[then("the last fetch reported not found")]
fn last_fetch_not_found(lifecycle_context: &LifecycleContext) -> Result<(), StepError> {
    match lifecycle_context.fetches.last() {
        Some(FetchOutcome::NotFound) => Ok(()),
        Some(other) => Err(StepError::Assertion(format!(
            "expected the last fetch to report not found, got {other:?}"
        ))),
        None => Err(StepError::Assertion(String::from("no fetch recorded"))),
    }
}

#[then("no instances are listed")]
fn nothing_listed(lifecycle_context: &LifecycleContext) -> Result<(), StepError> {
    match lifecycle_context.listing {
        Some(ListOutcome::Listed(ref instances)) if instances.is_empty() => Ok(()),
        Some(ListOutcome::Listed(ref instances)) => Err(StepError::Assertion(format!(
            "expected no instances, got {}",
            instances.len()
        ))),
        Some(ListOutcome::Failed(ref message)) => {
            Err(StepError::Assertion(format!("listing failed: {message}")))
        }
        None => Err(StepError::Assertion(String::from("listing never ran"))),
    }
}

#[then("the listing names \"{names}\"")]
fn listing_names(lifecycle_context: &LifecycleContext, names: String) -> Result<(), StepError> {
    let Some(ListOutcome::Listed(ref instances)) = lifecycle_context.listing else {
        return Err(StepError::Assertion(String::from("listing did not succeed")));
    };
    let actual: Vec<&str> = instances
        .iter()
        .map(|instance| instance.droplet.name.as_str())
        .collect();
    let expected: Vec<&str> = names.split(',').collect();
    if actual == expected {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {expected:?}, got {actual:?}"
        )))
    }
}
