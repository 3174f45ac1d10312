//! `rippled` — the ripple feed server binary.
//!
//! Usage:
//!   rippled [--data-dir <dir>] [--db <path>] [--listen <addr>]
//!
//! On first start the database is seeded with the fixture users and
//! posts; later starts reuse whatever is on disk.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use ripple_core::Module;

/// Ripple feed server.
#[derive(Parser, Debug)]
#[command(name = "rippled", about = "Ripple social-feed server")]
struct Cli {
    /// Directory for persistent data.
    #[arg(long = "data-dir", default_value = "data")]
    data_dir: PathBuf,

    /// Path to the redb database file (default: {data-dir}/feed.redb).
    #[arg(long = "db")]
    db_path: Option<PathBuf>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:3000")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Initialize storage.
    std::fs::create_dir_all(&cli.data_dir)?;
    let config = ripple_core::ServiceConfig {
        data_dir: Some(cli.data_dir.clone()),
        db_path: cli.db_path.clone(),
        listen: cli.listen.clone(),
    };

    let kv: Arc<dyn ripple_kv::KVStore> = Arc::new(
        ripple_kv::RedbStore::open(&config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    let service = feed::service::FeedService::new(kv)
        .map_err(|e| anyhow::anyhow!("failed to initialize feed service: {}", e))?;
    let feed_module = feed::FeedModule::new(service);
    info!("Feed module initialized");

    let module_routes = vec![(feed_module.name().to_string(), feed_module.routes())];
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("ripple server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
