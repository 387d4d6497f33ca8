//! Command-line interface definitions for the `droplet-adapter` binary.
//!
//! This module isolates the clap parser structures so the build script can
//! reuse them when generating the manual page. It must not depend on the
//! library crate.

use clap::{Args, Parser};

/// Top-level command.
#[derive(Debug, Parser)]
#[command(
    name = "droplet-adapter",
    about = "Manage DigitalOcean droplets and OAuth tokens through a normalized schema",
    arg_required_else_help = true
)]
pub enum Cli {
    /// Create a droplet and print the normalized instance.
    #[command(name = "create")]
    Create(CreateCommand),
    /// List droplets visible to the configured token.
    #[command(name = "list")]
    List(ListCommand),
    /// Show a single droplet with its current networks.
    #[command(name = "get")]
    Get(DropletCommand),
    /// Request deletion of a droplet.
    #[command(name = "destroy")]
    Destroy(DropletCommand),
    /// Print the OAuth authorization URL.
    #[command(name = "auth-url")]
    AuthUrl(AuthUrlCommand),
    /// Exchange an OAuth authorization code for a token.
    #[command(name = "exchange-token")]
    ExchangeToken(ExchangeTokenCommand),
}

/// Arguments for `create`.
#[derive(Clone, Debug, Args)]
pub struct CreateCommand {
    /// Droplet name.
    #[arg(long)]
    pub name: String,
    /// Region slug (for example `nyc3`).
    #[arg(long)]
    pub region: String,
    /// Size slug (for example `s-1vcpu-1gb`).
    #[arg(long)]
    pub size: String,
    /// Image slug (for example `ubuntu-24-04-x64`).
    #[arg(long)]
    pub image: String,
    /// SSH key fingerprint; repeat for several keys.
    #[arg(long = "ssh-key")]
    pub ssh_keys: Vec<String>,
    /// Enable automated backups.
    #[arg(long)]
    pub backups: bool,
    /// Enable IPv6.
    #[arg(long)]
    pub ipv6: bool,
    /// Enable private networking.
    #[arg(long)]
    pub private_networking: bool,
    /// Cloud-init user data.
    #[arg(long, default_value = "")]
    pub user_data: String,
}

/// Arguments for `list`.
#[derive(Clone, Debug, Args)]
pub struct ListCommand {
    /// Fetch only this page instead of following every page.
    #[arg(long)]
    pub page: Option<u32>,
}

/// Arguments for commands addressing one droplet.
#[derive(Clone, Debug, Args)]
pub struct DropletCommand {
    /// Numeric droplet identifier.
    pub id: u64,
}

/// Arguments for `auth-url`.
#[derive(Clone, Debug, Args)]
pub struct AuthUrlCommand {
    /// Scope to request; repeat for several scopes.
    #[arg(long = "scope", default_value = "read")]
    pub scopes: Vec<String>,
}

/// Arguments for `exchange-token`.
#[derive(Clone, Debug, Args)]
pub struct ExchangeTokenCommand {
    /// Authorization code returned to the redirect URI.
    pub code: String,
}
