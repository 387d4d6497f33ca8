//! Binary entry point for the droplet-adapter CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use droplet_adapter::{
    AdapterConfig, ConfigError, DropletId, InstanceAdapter, InstanceCreateRequest, OAuthError,
    PageRequest, ProviderError,
};

mod cli;

use cli::{AuthUrlCommand, Cli, CreateCommand, ExchangeTokenCommand, ListCommand};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("oauth error: {0}")]
    OAuth(#[from] OAuthError),
    #[error("failed to write output: {0}")]
    Output(String),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = AdapterConfig::load_without_cli_args()?;
    match cli {
        Cli::Create(args) => {
            let adapter = compute_adapter(&config)?;
            let instance = adapter.create(&create_request(args)).await?;
            print_json(&instance)
        }
        Cli::List(args) => list_command(&config, &args).await,
        Cli::Get(args) => {
            let adapter = compute_adapter(&config)?;
            let instance = adapter.get(DropletId::new(args.id)).await?;
            print_json(&instance)
        }
        Cli::Destroy(args) => {
            let adapter = compute_adapter(&config)?;
            adapter.destroy(DropletId::new(args.id)).await?;
            Ok(())
        }
        Cli::AuthUrl(args) => auth_url_command(&config, &args),
        Cli::ExchangeToken(args) => exchange_token_command(&config, &args).await,
    }
}

fn compute_adapter(
    config: &AdapterConfig,
) -> Result<InstanceAdapter<droplet_adapter::DigitalOceanApi>, CliError> {
    let session = config.compute_session()?;
    Ok(InstanceAdapter::new(session).with_page_size(config.effective_page_size()))
}

async fn list_command(config: &AdapterConfig, args: &ListCommand) -> Result<(), CliError> {
    let adapter = compute_adapter(config)?;
    if let Some(page) = args.page {
        let request = PageRequest::first(config.effective_page_size()).at(page);
        let listing = adapter.list_page(request).await?;
        return print_json(&listing.items);
    }
    let instances = adapter.list().await?;
    print_json(&instances)
}

fn auth_url_command(config: &AdapterConfig, args: &AuthUrlCommand) -> Result<(), CliError> {
    let app = config.validate_oauth_redirect()?;
    let client = config.oauth_client()?;
    let url = client.authorization_url(&app.client_id, &app.redirect_uri, &args.scopes);
    writeln!(io::stdout(), "{url}").map_err(|err| CliError::Output(err.to_string()))
}

async fn exchange_token_command(
    config: &AdapterConfig,
    args: &ExchangeTokenCommand,
) -> Result<(), CliError> {
    let app = config.validate_oauth()?;
    let client = config.oauth_client()?;
    let token = client
        .exchange_code_for_token(
            &args.code,
            &app.client_id,
            &app.client_secret,
            &app.redirect_uri,
        )
        .await?;
    print_json(&token)
}

fn create_request(args: CreateCommand) -> InstanceCreateRequest {
    InstanceCreateRequest::builder()
        .name(args.name)
        .region(args.region)
        .size(args.size)
        .image(args.image)
        .ssh_keys(args.ssh_keys)
        .backups(args.backups)
        .ipv6(args.ipv6)
        .private_networking(args.private_networking)
        .user_data(args.user_data)
        .build()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| CliError::Output(err.to_string()))?;
    writeln!(io::stdout(), "{rendered}").map_err(|err| CliError::Output(err.to_string()))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
