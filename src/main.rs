//! lp-resolve: decompose one LP token from the command line
//!
//! Loads the resolver configuration, connects to the network's RPC endpoint
//! and prints the token's component tree as JSON. A per-reserve summary is
//! logged alongside unless `--json` is given.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use anyhow::{Context, Result};
use clap::Parser;
use lp_token_resolver::{
    ChainTokenMetadata, ComponentResolver, Connection, ProtocolKind, QueryEnv, ResolutionReport,
    ResolveInput, ResolverConfig, RpcContractView,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// LP token decomposition (Bancor, Curve)
#[derive(Parser)]
#[command(name = "lp-resolve")]
struct Args {
    /// Path to the TOML configuration
    #[arg(short, long, default_value = "config/resolver.toml")]
    config: String,

    /// Network to query (must have an RPC URL)
    #[arg(short, long, env = "NETWORK", default_value = "mainnet")]
    network: String,

    /// Pool protocol of the token (bancor, curve)
    #[arg(short, long)]
    protocol: ProtocolKind,

    /// LP token address
    #[arg(short, long)]
    token: String,

    /// Look reserves up concurrently
    #[arg(long)]
    parallel: bool,

    /// Print only the JSON result
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let network = args.network.to_lowercase();

    let config = ResolverConfig::load(&args.config)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let endpoints = config.endpoints(&network);
    if !endpoints.contains_key(&network) {
        anyhow::bail!(
            "No RPC URL for network '{}': set {} or [networks.{}].rpc_url in {}",
            network,
            lp_token_resolver::config::rpc_env_var(&network),
            network,
            args.config
        );
    }

    let view = Arc::new(RpcContractView::new(endpoints));
    let tokens = ChainTokenMetadata::new(view.clone());
    let resolver = ComponentResolver::new(view, tokens, config.protocol(args.protocol))
        .with_parallel_reserves(args.parallel || config.general.parallel_reserves);

    info!("Resolving {} ({} on {})", args.token, args.protocol, network);

    let env = QueryEnv::new(Connection::new(network.clone()));
    let root = resolver
        .resolve_components(Some(&env), &ResolveInput::new(args.token.trim()))
        .await
        .with_context(|| format!("Failed to resolve {}", args.token))?;

    println!("{}", serde_json::to_string_pretty(&root)?);

    if !args.json {
        let report = ResolutionReport::new(&root, args.protocol.to_string(), network);
        for line in report.to_string().lines() {
            info!("{}", line);
        }
    }

    Ok(())
}
