mod config;
mod db;
mod error;
mod handler;
mod middleware;
mod model;
mod route;
mod schema;
mod security;

use dotenv::dotenv;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

// Struct representing the application state
pub struct AppState {
    db: Pool<Sqlite>,
    config: Config,
}

// Entry point of the application
#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    // Connect to the database, creating the file on first run
    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => {
            info!(database_url = %config.database_url, "connected to the database");
            pool
        }
        Err(err) => {
            error!(error = %err, "failed to connect to the database");
            std::process::exit(1);
        }
    };

    if let Err(err) = db::ensure_schema(&pool).await {
        error!(error = %err, "failed to create database schema");
        std::process::exit(1);
    }

    let addr = config.listen_addr;
    let app_state = Arc::new(AppState { db: pool, config });
    let app = route::create_router(app_state);

    info!(%addr, "server started");

    // Start the Axum server
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server error");
}
