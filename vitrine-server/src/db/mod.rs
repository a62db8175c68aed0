//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One connection pool per process, injected as `Arc<dyn QueryExecutor>`
//! - Parameterized statements only; table and column names come from
//!   static catalog definitions
//! - Store errors stop at the repository boundary

pub mod pool;
pub mod repos;

#[cfg(test)]
pub(crate) mod testing;

pub use pool::{
    create_pool, create_pool_with_options, ConnectionPool, DbError, QueryExecutor, QueryOutput,
    Statement,
};
pub use repos::*;
