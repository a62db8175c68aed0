//! vitrine-server: list/delete HTTP endpoints over the vitrine catalogs
//!
//! Three catalogs (titles, sales, player cards) share one pattern:
//! a pooled PostgreSQL connection, a generic repository and a generic
//! controller, parameterized by static catalog definitions.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, ConnectionPool};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
