//! Shared HTTP client for provider calls.

use std::sync::LazyLock;
use std::time::Duration;

/// Deadline applied to every outbound request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Returns a handle to the shared connection pool.
pub(crate) fn client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}
