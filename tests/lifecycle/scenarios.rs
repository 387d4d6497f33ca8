//! BDD scenarios for the droplet lifecycle.

use rstest_bdd_macros::scenario;

use super::test_helpers::{LifecycleContext, lifecycle_context};

#[scenario(
    path = "tests/features/instance_lifecycle.feature",
    name = "Destroyed droplets are no longer found"
)]
fn scenario_destroy_then_missing(lifecycle_context: LifecycleContext) {
    drop(lifecycle_context);
}

#[scenario(
    path = "tests/features/instance_lifecycle.feature",
    name = "Destroying an unknown droplet surfaces the provider error"
)]
fn scenario_destroy_unknown(lifecycle_context: LifecycleContext) {
    drop(lifecycle_context);
}

#[scenario(
    path = "tests/features/instance_lifecycle.feature",
    name = "An empty account lists nothing"
)]
fn scenario_empty_listing(lifecycle_context: LifecycleContext) {
    drop(lifecycle_context);
}

#[scenario(
    path = "tests/features/instance_lifecycle.feature",
    name = "Listing spans several pages"
)]
fn scenario_paged_listing(lifecycle_context: LifecycleContext) {
    drop(lifecycle_context);
}
