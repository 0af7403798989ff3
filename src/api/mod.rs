//! REST API for the dispatch planner.
//!
//! Provides one endpoint:
//! - `POST /productionplan` — compute a dispatch plan for a wire-format
//!   request, returning per-plant allocations in request order

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::post;

/// Builds the axum router with all API routes.
///
/// The planner is stateless; each request builds and discards its own
/// working records, so the router carries no shared state.
pub fn router() -> Router {
    Router::new().route("/productionplan", post(handlers::post_production_plan))
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(addr: SocketAddr) {
    let app = router();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
