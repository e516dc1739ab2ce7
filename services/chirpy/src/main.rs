// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirpy Service
//!
//! Accepts chirps, censors profanity, counts static asset hits and stores
//! users.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables, with an optional
//! `.env` file read first:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `PLATFORM`: `dev` enables `POST /admin/reset`
//! - `DB_URL`: Postgres connection string (default: in-memory users)
//! - `FILEPATH_ROOT`: Directory served under `/app/` (default: .)
//! - `MAX_CHIRP_LENGTH`: Chirp length limit (default: 140)
//! - `PROFANE_WORDS`: Comma-separated denylist

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chirpy::{
    config::Config,
    db::{MemoryUserStore, PgUserStore, UserStore},
    handlers::AppState,
    routes::router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before RUST_LOG is read
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(e) = dotenv {
        info!(error = %e, "No .env file loaded");
    }

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        platform = %config.platform,
        filepath_root = %config.filepath_root,
        max_chirp_length = config.chirp.max_length,
        metrics_enabled = config.metrics.enabled,
        "Starting Chirpy"
    );

    let users: Arc<dyn UserStore> = match config.db_url.as_deref() {
        Some(url) => {
            let store = PgUserStore::connect(url).await?;
            info!("Connected to Postgres");
            Arc::new(store)
        }
        None => {
            warn!("DB_URL not set, users are kept in memory");
            Arc::new(MemoryUserStore::new())
        }
    };

    let state = Arc::new(AppState::new(config.clone(), users)?);
    let app = router(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
