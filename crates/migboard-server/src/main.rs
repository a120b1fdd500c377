//! Main entry point for Migboard.

use clap::Parser;
use migboard_config::ConfigLoader;
use migboard_server::{init_logging, MigboardServer};
use std::path::PathBuf;
use tracing::{error, info};

/// Workspace migration dashboard.
#[derive(Debug, Parser)]
#[command(name = "migboard", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, env = "MIGBOARD_CONFIG", default_value = "migboard.yaml")]
    config: PathBuf,

    /// Address to bind, overriding the configuration.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the configuration.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loader = ConfigLoader::new(&cli.config);
    let mut config = loader.load_with_env().await?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    init_logging(&config.logging)?;
    info!(config = %loader.path().display(), "Starting Migboard");

    let server = MigboardServer::new(config);
    if let Err(e) = server.start().await {
        error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
