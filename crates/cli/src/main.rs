//! # Ferrous Galaxy
//!
//! Read-through bucket cache node: loads object store data on cache
//! misses, keeps its peer list in sync with DNS service discovery and
//! exposes cache statistics over HTTP.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use ferrous_galaxy_domain::CliOverrides;
use ferrous_galaxy_jobs::{JobRunner, PeerRefreshJob};
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ferrous-galaxy")]
#[command(version)]
#[command(about = "Distributed read-through cache for object storage buckets")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// URL other peers reach this instance at
    #[arg(long)]
    self_url: Option<String>,

    /// Root directory of the filesystem bucket
    #[arg(long)]
    storage_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        web_port: cli.web_port,
        self_url: cli.self_url,
        storage_directory: cli.storage_dir,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Ferrous Galaxy starting");
    bootstrap::log_config_summary(cli.config.as_deref(), &config);

    let shutdown = CancellationToken::new();
    let services = di::Services::build(&config, shutdown.clone())?;

    let jobs = JobRunner::new()
        .with_peer_refresh(
            PeerRefreshJob::new(services.refresh_peers.clone())
                .with_interval(Duration::from_secs(config.groupcache.dns_interval_secs))
                .with_cancellation(shutdown.clone()),
        )
        .start()
        .await;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    let bind_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;

    let served =
        server::start_web_server(bind_addr, services.app_state.clone(), shutdown.clone()).await;
    shutdown.cancel();

    for job in jobs {
        if let Err(e) = job.await {
            error!(error = %e, "Background job ended abnormally");
        }
    }

    info!(
        cached_entries = services.galaxy.cached_entries(),
        "Ferrous Galaxy stopped"
    );
    served
}
