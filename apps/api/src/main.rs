mod config;
mod directory;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::directory::{MemoryDirectory, SeedData};
use crate::matching::MatchingEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matchboard API v{}", env!("CARGO_PKG_VERSION"));

    let directory = match &config.catalog_path {
        Some(path) => Arc::new(MemoryDirectory::load(path).await?),
        None => {
            warn!("CATALOG_PATH not set, starting with an empty directory");
            Arc::new(MemoryDirectory::new(SeedData::default()))
        }
    };

    let engine = MatchingEngine::new(config.matching.clone());
    info!(
        "Matching engine: weights {:?}, margin threshold {}, policy {:?}",
        config.matching.weights, config.matching.margin_threshold, config.matching.eligibility
    );

    let state = AppState {
        config: config.clone(),
        engine,
        catalog: directory.clone(),
        students: directory.clone(),
        applications: directory,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
