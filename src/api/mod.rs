//! REST API over the usage aggregators.
//!
//! Every endpoint takes a usage profile as its JSON body:
//! - `POST /usage`, `POST /savings`: single-period minutes
//! - `POST /usage/day/{day}`, `POST /savings/day/{day}`: one day of a month profile
//! - `POST /month?metric=usage|savings`: per-day breakdown

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::post;
use tracing::info;

/// Builds the axum router with all API routes.
///
/// The handlers are pure functions of the request body, so the router
/// carries no shared state.
pub fn router() -> Router {
    Router::new()
        .route("/usage", post(handlers::post_usage))
        .route("/savings", post(handlers::post_savings))
        .route("/usage/day/{day}", post(handlers::post_usage_for_day))
        .route("/savings/day/{day}", post(handlers::post_savings_for_day))
        .route("/month", post(handlers::post_month))
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, router()).await
}
