//! Provider-agnostic instance records returned by the adapter.

use serde::{Deserialize, Serialize};

/// Provider tag stamped on every [`Instance`] built by this crate.
pub const DIGITAL_OCEAN_PROVIDER: &str = "digital_ocean";

/// SSH key reference, identified by its fingerprint.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SshKey {
    /// MD5 fingerprint as shown by the provider (for example `aa:bb:...`).
    pub fingerprint: String,
}

impl SshKey {
    /// Wraps a fingerprint.
    #[must_use]
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
        }
    }
}

/// One IP address assignment on an instance.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NetworkInterface {
    /// Assigned address.
    pub ip_address: String,
    /// Netmask (dotted quad for v4, prefix length for v6).
    pub netmask: String,
    /// Gateway address.
    pub gateway: String,
    /// Interface kind, `public` or `private`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Addresses grouped by IP version. Either list may be empty.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Networks {
    /// IPv4 interfaces in provider order.
    pub v4: Vec<NetworkInterface>,
    /// IPv6 interfaces in provider order.
    pub v6: Vec<NetworkInterface>,
}

/// Normalized droplet fields.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Droplet {
    /// Provider-assigned numeric identifier.
    pub id: u64,
    /// Droplet name.
    pub name: String,
    /// Region slug.
    pub region: String,
    /// Image slug the droplet booted from.
    pub operating_system: String,
    /// Whether private networking is enabled.
    pub private_networking: bool,
    /// Size slug (instance type label).
    pub instance_name: String,
    /// Network configuration known at the time of the call.
    pub networks: Networks,
    /// SSH keys; only populated on create, since the provider does not echo them.
    pub ssh_keys: Vec<SshKey>,
}

/// A droplet tagged with the backend that produced it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Instance {
    /// Backend tag, always [`DIGITAL_OCEAN_PROVIDER`] for this crate.
    pub provider: String,
    /// Droplet fields, flattened into the same JSON object.
    #[serde(flatten)]
    pub droplet: Droplet,
}

impl Instance {
    /// Tags a droplet as coming from DigitalOcean.
    #[must_use]
    pub fn digital_ocean(droplet: Droplet) -> Self {
        Self {
            provider: DIGITAL_OCEAN_PROVIDER.to_owned(),
            droplet,
        }
    }
}
