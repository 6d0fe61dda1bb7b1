//! formdrop-web - FormDrop web service
//!
//! Hosts the public submission intake endpoint, the dashboard API, and the
//! static dashboard UI in a single binary.

use anyhow::Result;
use clap::Parser;
use formdrop_common::{auth, config, db};
use formdrop_web::{build_router, AppState};
use std::net::SocketAddr;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "formdrop-web", about = "FormDrop web service")]
struct Args {
    /// Root folder holding the FormDrop database (overrides FORMDROP_ROOT
    /// and config.toml)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5730)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting FormDrop web service v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref())?;
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    // Dashboard API token (0 disables the auth check)
    let shared_secret = auth::load_shared_secret(&pool).await?;
    if shared_secret == 0 {
        info!("Dashboard API authentication disabled (shared_secret = 0)");
    } else {
        info!("✓ Loaded shared secret for dashboard API authentication");
    }

    // Create application state and router
    let state = AppState::new(pool, shared_secret);
    let app = build_router(state);

    // The intake endpoint must be reachable from outside, so bind all
    // interfaces rather than loopback
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("formdrop-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
