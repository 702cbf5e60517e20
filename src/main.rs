//! Cardano Transaction Gateway
//!
//! Compiles a declarative JSON action DSL into unsigned Cardano
//! transactions and answers balance/UTXO queries, choosing per request
//! between a dual-indexer provider pair (Ogmios + Kupo) and a
//! self-sufficient REST fallback (Dolos).

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use cardano_gateway::compiler::StagingSdk;
use cardano_gateway::config::loader;
use cardano_gateway::http::HttpServer;
use cardano_gateway::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "cardano-gateway", about = "Unsigned-transaction build and provider gateway")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::load_from_env()?,
    };

    logging::init(&config.observability);

    tracing::info!("cardano-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        ogmios_url = %config.providers.ogmios_url,
        kupo_url = %config.providers.kupo_url,
        dolos_rest_url = %config.providers.dolos_rest_url,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, Arc::new(StagingSdk));
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
