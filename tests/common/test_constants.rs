//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Token handed to sessions pointed at local stubs.
pub const DUMMY_TOKEN: &str = "dop_v1_test_token";

/// Region slug used by request fixtures.
pub const DEFAULT_REGION: &str = "nyc3";

/// Size slug used by request fixtures.
pub const DEFAULT_SIZE: &str = "s-1vcpu-1gb";

/// Image slug used by request fixtures.
pub const DEFAULT_IMAGE: &str = "ubuntu-24-04-x64";
