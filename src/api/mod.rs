//! JSON API over the three pipelines.
//!
//! Provides three GET endpoints, each recomputing its pipeline per request:
//! - `/tariff`: bills, savings and the shifted week
//! - `/privacy`: real and synthetic tables with k-anonymity and utility checks
//! - `/carbon`: recommended window and the intensity timeline
//!
//! Query parameters override the base scenario field by field.

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::ScenarioConfig;

pub use types::{CarbonQuery, ErrorResponse, PrivacyQuery, TariffQuery};

/// Immutable application state shared across all request handlers.
///
/// Requests never mutate it, so it is shared through `Arc` without locks.
pub struct AppState {
    /// Scenario that query parameters are applied on top of.
    pub base: ScenarioConfig,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tariff", get(handlers::get_tariff))
        .route("/privacy", get(handlers::get_privacy))
        .route("/carbon", get(handlers::get_carbon))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the listener cannot bind to `addr` or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
