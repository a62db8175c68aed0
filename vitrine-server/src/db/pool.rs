//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created
//! once at startup and shared by every catalog repository through the
//! [`QueryExecutor`] trait.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row};

use crate::models::{CatalogKey, CatalogRecord};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Column that row-returning statements must expose, holding each row as a
/// JSON object (`row_to_json`).
pub const RECORD_COLUMN: &str = "record";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("statement produced {actual}, expected {expected}")]
    UnexpectedOutput {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A single SQL statement with its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<CatalogKey>,
    returns_rows: bool,
}

impl Statement {
    /// Statement returning rows, each exposed as a JSON object in
    /// [`RECORD_COLUMN`].
    pub fn fetch(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            returns_rows: true,
        }
    }

    /// Statement reporting an affected-row count.
    pub fn execute(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            returns_rows: false,
        }
    }

    /// Bind the next positional parameter (`$1`, `$2`, ...).
    pub fn bind(mut self, param: CatalogKey) -> Self {
        self.params.push(param);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[CatalogKey] {
        &self.params
    }

    pub fn returns_rows(&self) -> bool {
        self.returns_rows
    }
}

/// What the store reported for a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Rows(Vec<CatalogRecord>),
    RowsAffected(u64),
}

impl QueryOutput {
    fn kind(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::RowsAffected(_) => "an affected-row count",
        }
    }

    pub fn into_rows(self) -> Result<Vec<CatalogRecord>, DbError> {
        match self {
            Self::Rows(rows) => Ok(rows),
            other => Err(DbError::UnexpectedOutput {
                expected: "rows",
                actual: other.kind(),
            }),
        }
    }

    pub fn rows_affected(&self) -> Result<u64, DbError> {
        match self {
            Self::RowsAffected(count) => Ok(*count),
            other => Err(DbError::UnexpectedOutput {
                expected: "an affected-row count",
                actual: other.kind(),
            }),
        }
    }
}

/// Executes statements against the relational store.
///
/// Errors propagate unchanged; implementations never retry.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(&self, statement: &Statement) -> Result<QueryOutput, DbError>;
}

/// Process-wide PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    pool: PgPool,
}

impl ConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection; waits for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/vitrine").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<ConnectionPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<ConnectionPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(ConnectionPool::new(pool))
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [CatalogKey],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            CatalogKey::Int(id) => query.bind(*id),
            CatalogKey::Text(id) => query.bind(id.as_str()),
        };
    }
    query
}

#[async_trait]
impl QueryExecutor for ConnectionPool {
    async fn query(&self, statement: &Statement) -> Result<QueryOutput, DbError> {
        tracing::debug!(
            sql = statement.sql(),
            params = statement.params().len(),
            "executing statement"
        );

        let query = bind_params(sqlx::query(statement.sql()), statement.params());

        if statement.returns_rows() {
            let rows = query.fetch_all(&self.pool).await?;
            let records = rows
                .iter()
                .map(|row| {
                    row.try_get::<Json<CatalogRecord>, _>(RECORD_COLUMN)
                        .map(|Json(record)| record)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(QueryOutput::Rows(records))
        } else {
            let done = query.execute(&self.pool).await?;
            Ok(QueryOutput::RowsAffected(done.rows_affected()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn statement_collects_params_in_order() {
        let statement = Statement::execute("DELETE FROM t WHERE a = $1 AND b = $2")
            .bind(CatalogKey::Int(1))
            .bind(CatalogKey::from("x"));

        assert!(!statement.returns_rows());
        assert_eq!(
            statement.params(),
            &[CatalogKey::Int(1), CatalogKey::Text("x".into())]
        );
    }

    #[test]
    fn output_kind_mismatch_is_an_error() {
        let err = QueryOutput::RowsAffected(1).into_rows().unwrap_err();
        assert!(matches!(err, DbError::UnexpectedOutput { expected: "rows", .. }));

        let err = QueryOutput::Rows(vec![]).rows_affected().unwrap_err();
        assert!(matches!(err, DbError::UnexpectedOutput { actual: "rows", .. }));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p vitrine-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_returns_rows_as_records() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let output = pool
            .query(&Statement::fetch(
                "SELECT row_to_json(t) AS record FROM (SELECT 1 AS id, 26.9 AS price) t",
            ))
            .await
            .expect("query failed");

        let rows = output.into_rows().expect("expected rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], serde_json::json!(1));
        assert_eq!(rows[0]["price"], serde_json::json!(26.9));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = Arc::new(create_pool(&url).await.expect("pool creation failed"));

        // Spawn 10 concurrent tasks sharing the one pool
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = Arc::clone(&pool);
                tokio::spawn(async move {
                    let statement = Statement::fetch(
                        "SELECT row_to_json(t) AS record FROM (SELECT $1::bigint AS n) t",
                    )
                    .bind(CatalogKey::Int(i));
                    let rows = pool
                        .query(&statement)
                        .await
                        .expect("concurrent query failed")
                        .into_rows()
                        .expect("expected rows");
                    rows[0]["n"].as_i64().expect("n is an integer")
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }
}
