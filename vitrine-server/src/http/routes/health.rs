//! Health check endpoint
//!
//! Liveness only: reports the build version and which catalog prefixes this
//! process routes. It does not touch the database, so a reachable `/health`
//! says nothing about the pool.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::models::Catalog;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Route prefixes of the catalogs being served
    pub catalogs: Vec<&'static str>,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalogs: Catalog::all().iter().map(|catalog| catalog.prefix).collect(),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
