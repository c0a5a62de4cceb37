//! Atelier content server
//!
//! Loads gallery and café content from the hosted backend (falling back to
//! the local mirror) and serves it over HTTP.
//!
//! Usage:
//!   atelier-server --remote-url https://example.supabase.co --port 8080
//!   atelier-server --offline
//!   atelier-server migrate
//!   atelier-server init

use anyhow::{Context, Result};
use atelier_mirror::{Mirror, SqliteMirror};
use atelier_remote::{
    MemoryRemote, RemoteStore, RestConfig, RestRemote, REMOTE_KEY_ENV, REMOTE_URL_ENV,
};
use atelier_server::build_router;
use atelier_sync::{initialize_remote, migrate_mirror_to_remote, SiteData, SiteDataConfig};
use clap::{Parser, Subcommand};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "atelier-server")]
#[command(about = "Atelier gallery and café content server")]
struct Args {
    /// Hosted backend URL
    #[arg(long, env = REMOTE_URL_ENV)]
    remote_url: Option<String>,

    /// Hosted backend API key
    #[arg(long, env = REMOTE_KEY_ENV, hide_env_values = true, default_value = "")]
    remote_key: String,

    /// Request timeout for the hosted backend (seconds)
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Path to the local mirror database
    #[arg(long, env = "ATELIER_MIRROR_PATH", default_value = "atelier-mirror.db")]
    mirror_path: PathBuf,

    /// Serve from the local mirror only, never contacting the backend
    #[arg(long)]
    offline: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the content API (default)
    Serve {
        /// HTTP port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// Push all mirrored content to the hosted backend
    Migrate,
    /// Create the opening hours row in the hosted backend if missing
    Init,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_remote(args: &Args) -> Result<Arc<dyn RemoteStore>> {
    if args.offline {
        info!("Offline mode: serving local data only");
        let remote = MemoryRemote::new();
        remote.set_offline(true);
        return Ok(Arc::new(remote));
    }

    let base_url = args
        .remote_url
        .clone()
        .with_context(|| format!("no backend URL; pass --remote-url or set {REMOTE_URL_ENV}"))?;
    if args.remote_key.is_empty() {
        warn!("{} is not set; requests will be anonymous", REMOTE_KEY_ENV);
    }
    let config = RestConfig {
        base_url,
        api_key: args.remote_key.clone(),
        timeout_secs: args.timeout,
    };
    let remote = RestRemote::new(config).context("Failed to create backend client")?;
    Ok(Arc::new(remote))
}

fn open_mirror(path: &Path) -> Result<Mirror> {
    let store = SqliteMirror::open(path)
        .with_context(|| format!("Failed to open local mirror at {}", path.display()))?;
    Ok(Mirror::new(Arc::new(store)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn serve(remote: Arc<dyn RemoteStore>, mirror: Mirror, port: u16) -> Result<()> {
    let site = Arc::new(SiteData::new(remote, mirror, SiteDataConfig::default()));
    site.load().await;

    let app = build_router(site.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;
    info!("Content API listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    site.shutdown().await.context("Failed to flush local mirror")?;
    info!("Atelier server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let remote = build_remote(&args)?;
    let mirror = open_mirror(&args.mirror_path)?;

    match args.command.unwrap_or(Command::Serve { port: 8080 }) {
        Command::Serve { port } => serve(remote, mirror, port).await,
        Command::Migrate => {
            let report = migrate_mirror_to_remote(remote.as_ref(), &mirror).await;
            for c in &report.collections {
                match &c.error {
                    None => info!("{}: migrated {}/{}", c.collection, c.migrated, c.found),
                    Some(e) => {
                        warn!("{}: migrated {}/{}: {}", c.collection, c.migrated, c.found, e)
                    }
                }
            }
            anyhow::ensure!(report.is_success(), "migration incomplete");
            Ok(())
        }
        Command::Init => {
            let seeded = initialize_remote(remote.as_ref())
                .await
                .context("Failed to initialize backend")?;
            if seeded {
                info!("Backend initialized with default opening hours");
            } else {
                info!("Backend already initialized");
            }
            Ok(())
        }
    }
}
