//! PantryKeep backend server.
//!
//! Serves the pantry-tracking API: account registration and login,
//! bearer-token sessions, and in-memory CRUD over pantry items,
//! shopping lists, meal plans and expenses.
//!
//! # Configuration
//!
//! Environment variables:
//! - `PANTRYKEEP_PORT`: port to listen on (default: 8080)
//! - `PANTRYKEEP_TOKEN_SECRET`: token signing secret (required)
//! - `PANTRYKEEP_SEED_DEMO`: seed demo records at startup when truthy

mod auth;
mod config;
mod error;
mod models;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::TokenService;
use config::Config;
use state::AppState;
use storage::Store;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantrykeep=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(Store::new());
    if config.seed_demo {
        match store.seed_demo() {
            Ok(()) => tracing::info!("Seeded demo records"),
            Err(e) => {
                tracing::error!("Failed to seed demo records: {}", e);
                std::process::exit(1);
            }
        }
    }

    let state = AppState::new(store, TokenService::new(config.token_secret.as_bytes()));

    let app = routes::api_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
