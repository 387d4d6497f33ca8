//! Request and response bodies for the DigitalOcean v2 droplet endpoints.
//!
//! Only the fields the adapter reads are modelled; everything else in the
//! provider's payload is ignored during decoding.

use serde::{Deserialize, Serialize};

/// Body for `POST /v2/droplets`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DropletCreatePayload {
    /// Droplet name.
    pub name: String,
    /// Region slug.
    pub region: String,
    /// Size slug.
    pub size: String,
    /// Image slug.
    pub image: String,
    /// SSH key fingerprints.
    pub ssh_keys: Vec<String>,
    /// Enables automated backups.
    pub backups: bool,
    /// Enables IPv6.
    pub ipv6: bool,
    /// Enables private networking.
    pub private_networking: bool,
    /// Cloud-init user data; omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// Envelope for single-droplet responses.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DropletEnvelope {
    /// The droplet.
    pub droplet: UpstreamDroplet,
}

/// Envelope for `GET /v2/droplets`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DropletListEnvelope {
    /// Droplets on this page.
    #[serde(default)]
    pub droplets: Vec<UpstreamDroplet>,
    /// Pagination links.
    #[serde(default)]
    pub links: Links,
    /// Page metadata.
    #[serde(default)]
    pub meta: Meta,
}

/// Pagination links block.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Links {
    /// Links to neighbouring pages.
    #[serde(default)]
    pub pages: PageLinks,
}

/// URLs of neighbouring pages; absent entries mean there is no such page.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageLinks {
    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the last page.
    #[serde(default)]
    pub last: Option<String>,
}

/// Page metadata block.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Meta {
    /// Total number of droplets across every page.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Droplet as returned by the provider.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpstreamDroplet {
    /// Numeric identifier.
    pub id: u64,
    /// Droplet name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle status (`new`, `active`, `off`, `archive`).
    #[serde(default)]
    pub status: String,
    /// Region the droplet lives in.
    #[serde(default)]
    pub region: UpstreamRegion,
    /// Image the droplet booted from.
    #[serde(default)]
    pub image: UpstreamImage,
    /// Size details.
    #[serde(default)]
    pub size: UpstreamSize,
    /// Top-level size slug, present on newer payloads.
    #[serde(default)]
    pub size_slug: Option<String>,
    /// Enabled features (for example `private_networking`, `ipv6`).
    #[serde(default)]
    pub features: Vec<String>,
    /// Assigned addresses.
    #[serde(default)]
    pub networks: UpstreamNetworks,
}

impl UpstreamDroplet {
    /// Returns the size slug, preferring the top-level field.
    #[must_use]
    pub fn size_slug(&self) -> &str {
        self.size_slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .unwrap_or(self.size.slug.as_str())
    }

    /// Reports whether the named feature is enabled.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|item| item == feature)
    }
}

/// Region reference embedded in a droplet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpstreamRegion {
    /// Region slug (for example `nyc3`).
    #[serde(default)]
    pub slug: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Image reference embedded in a droplet. Custom images have no slug.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpstreamImage {
    /// Image identifier.
    #[serde(default)]
    pub id: Option<u64>,
    /// Image slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Distribution name.
    #[serde(default)]
    pub distribution: Option<String>,
}

/// Size reference embedded in a droplet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpstreamSize {
    /// Size slug.
    #[serde(default)]
    pub slug: String,
}

/// Network block embedded in a droplet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpstreamNetworks {
    /// IPv4 interfaces.
    #[serde(default)]
    pub v4: Vec<UpstreamNetwork>,
    /// IPv6 interfaces.
    #[serde(default)]
    pub v6: Vec<UpstreamNetwork>,
}

/// One address entry as reported by the provider. The same shape serves both
/// IP versions; v6 netmasks arrive as integers.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpstreamNetwork {
    /// Assigned address.
    #[serde(default)]
    pub ip_address: String,
    /// Netmask, string for v4 and prefix length for v6.
    #[serde(default)]
    pub netmask: Netmask,
    /// Gateway address.
    #[serde(default)]
    pub gateway: String,
    /// `public` or `private`.
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Netmask in either of the provider's encodings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Netmask {
    /// Dotted-quad v4 netmask.
    Text(String),
    /// v6 prefix length.
    Prefix(u32),
    /// Explicit `null`, rendered as an empty string.
    Missing,
}

impl Default for Netmask {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl std::fmt::Display for Netmask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Missing => Ok(()),
        }
    }
}

/// Error body returned by the provider on non-2xx responses.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable identifier (for example `not_found`).
    #[serde(default)]
    pub id: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_omits_missing_user_data() {
        let payload = DropletCreatePayload {
            name: String::from("web"),
            ..DropletCreatePayload::default()
        };
        let json =
            serde_json::to_string(&payload).unwrap_or_else(|err| panic!("serialise: {err}"));
        assert!(!json.contains("user_data"), "unexpected field: {json}");
    }

    #[test]
    fn droplet_decodes_v6_prefix_netmask() {
        let body = r#"{
            "id": 3164494,
            "name": "example.com",
            "status": "active",
            "region": {"slug": "nyc3", "name": "New York 3"},
            "image": {"id": 6918990, "slug": "ubuntu-16-04-x64"},
            "size": {"slug": "s-1vcpu-1gb"},
            "features": ["ipv6", "private_networking"],
            "networks": {
                "v4": [{"ip_address": "104.236.32.182", "netmask": "255.255.192.0", "gateway": "104.236.0.1", "type": "public"}],
                "v6": [{"ip_address": "2604:a880:0:1010::18a:a001", "netmask": 64, "gateway": "2604:a880:0:1010::1", "type": "public"}]
            }
        }"#;
        let droplet: UpstreamDroplet =
            serde_json::from_str(body).unwrap_or_else(|err| panic!("decode: {err}"));
        assert_eq!(droplet.size_slug(), "s-1vcpu-1gb");
        assert!(droplet.has_feature("private_networking"));
        let [v6] = droplet.networks.v6.as_slice() else {
            panic!("expected one v6 network");
        };
        assert_eq!(v6.netmask.to_string(), "64");
    }

    #[test]
    fn null_or_absent_netmask_decodes_as_empty() {
        let body = r#"{
            "id": 7,
            "networks": {
                "v4": [
                    {"ip_address": "10.0.0.2", "netmask": null, "gateway": "", "type": "private"},
                    {"ip_address": "10.0.0.3", "type": "private"}
                ]
            }
        }"#;
        let droplet: UpstreamDroplet =
            serde_json::from_str(body).unwrap_or_else(|err| panic!("decode: {err}"));
        let masks: Vec<String> = droplet
            .networks
            .v4
            .iter()
            .map(|network| network.netmask.to_string())
            .collect();
        assert_eq!(masks, ["", ""]);
        assert_eq!(
            droplet.networks.v4.first().map(|network| &network.netmask),
            Some(&Netmask::Missing)
        );
    }

    #[test]
    fn list_envelope_tolerates_missing_links() {
        let envelope: DropletListEnvelope = serde_json::from_str(r#"{"droplets": []}"#)
            .unwrap_or_else(|err| panic!("decode: {err}"));
        assert!(envelope.droplets.is_empty());
        assert_eq!(envelope.links.pages.next, None);
    }
}
