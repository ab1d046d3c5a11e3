//! locallib-catalog - lending library catalog service
//!
//! Resolves configuration, opens (and if needed creates) the SQLite store,
//! then serves the catalog until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use locallib_common::config::{CatalogConfig, CliOverrides, Environment};
use locallib_common::db::init_database;
use locallib_catalog::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for locallib-catalog
#[derive(Parser, Debug)]
#[command(name = "locallib-catalog")]
#[command(about = "Lending library catalog web service")]
#[command(version)]
struct Args {
    /// SQLite database URL, e.g. sqlite://./library.db?mode=rwc
    #[arg(long, env = "LOCALLIB_DATABASE_URL")]
    database_url: Option<String>,

    /// Address to listen on
    #[arg(short, long, env = "LOCALLIB_BIND")]
    bind: Option<String>,

    /// development or production
    #[arg(short, long, env = "LOCALLIB_ENV")]
    environment: Option<Environment>,

    /// TOML config file
    #[arg(short, long, env = "LOCALLIB_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locallib_catalog=debug,locallib_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting locallib-catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = CatalogConfig::resolve(CliOverrides {
        database_url: args.database_url,
        bind_addr: args.bind,
        environment: args.environment,
        config_file: args.config,
    })
    .context("Failed to resolve configuration")?;
    info!("Environment: {}", config.environment);

    let pool = match init_database(&config.database_url).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Failed to initialize database");
        }
    };

    let state = AppState::new(pool.clone(), config.environment);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("locallib-catalog listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
