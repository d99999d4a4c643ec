//! Chain bridge CLI.
//!
//! Connects to the configured endpoint and exercises the bridge clients:
//! header queries, contract binding checks, and signer inspection.

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use chain_bridge::bridge::{
    BridgeError, CallContext, ReadOnlyBridgeClient, SigningIdentity,
};
use chain_bridge::config::{load_config, BridgeConfig};
use chain_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "chain-bridge")]
#[command(about = "Shared chain connection for validator contract handles", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured RPC endpoint.
    #[arg(short, long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a block header as JSON
    Header {
        /// Block number; latest when omitted
        #[arg(short, long)]
        number: Option<u64>,
    },
    /// Bind watch-only handles for every configured contract
    Bind,
    /// Print the signing identity's address
    Whoami,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(url) = cli.rpc_url {
        config.connection.rpc_url = url;
    }

    logging::init_logging(&config.observability);
    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(addr.parse()?);
    }

    match cli.command {
        Commands::Header { number } => {
            let client = ReadOnlyBridgeClient::connect_with(&config.connection).await?;
            let ctx = CallContext::with_timeout(Duration::from_secs(
                config.connection.call_timeout_secs,
            ));
            let header = client.header_by_number(&ctx, number).await?;
            println!("{}", serde_json::to_string_pretty(&header)?);
        }
        Commands::Bind => {
            let client = ReadOnlyBridgeClient::connect_with(&config.connection).await?;
            bind_configured(&client, &config).await?;
        }
        Commands::Whoami => {
            let identity = SigningIdentity::from_env(&config.signer.private_key_env)?;
            println!("{}", identity.address());
        }
    }

    Ok(())
}

async fn bind_configured(
    client: &ReadOnlyBridgeClient,
    config: &BridgeConfig,
) -> Result<(), BridgeError> {
    let contracts = &config.contracts;
    let mut bound = 0usize;

    if let Some(address) = parse(&contracts.factory) {
        let handle = client.new_factory_handle(address).await?;
        println!("{:<16} {}", handle.kind().as_str(), handle.address());
        bound += 1;
    }
    if let Some(address) = parse(&contracts.rollup) {
        let handle = client.new_rollup_watcher_handle(address).await?;
        println!("{:<16} {}", handle.kind().as_str(), handle.address());
        bound += 1;
    }
    if let Some(address) = parse(&contracts.one_step_proof) {
        let handle = client.new_proof_handle(address).await?;
        println!("{:<16} {}", handle.kind().as_str(), handle.address());
        bound += 1;
    }
    if let Some(address) = parse(&contracts.inbox) {
        let handle = client.new_inbox_handle(address).await?;
        println!("{:<16} {}", handle.kind().as_str(), handle.address());
        bound += 1;
    }

    tracing::info!(bound, chain_id = client.connection().chain_id(), "Contract bindings checked");
    Ok(())
}

/// Addresses were validated when the config was loaded.
fn parse(raw: &Option<String>) -> Option<Address> {
    raw.as_deref().and_then(|s| s.parse().ok())
}
