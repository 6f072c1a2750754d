#![deny(clippy::all, clippy::pedantic)]

mod alias;
mod clock;
mod config;
mod database;
mod error;
mod handlers;
mod models;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use clock::SystemClock;
use config::{Config, mask_connection_string};
use database::Database;
use handlers::AppState;
use tokio::net::TcpListener;

/// Connects to the store and builds the router.
async fn setup(config: &Config) -> anyhow::Result<Router> {
    tracing::info!(
        uri = %mask_connection_string(&config.mongodb_uri),
        database = %config.mongodb_database,
        collection = %config.mongodb_collection,
        "connecting to MongoDB"
    );
    let database = Database::new(&config.store_options())
        .await
        .context("failed to connect to MongoDB")?;
    tracing::info!("connected to MongoDB");

    let state = AppState::new(Arc::new(database), Arc::new(SystemClock), &config.api_token);

    Ok(handlers::router(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let app = setup(&config).await?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
