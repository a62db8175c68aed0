//! Catalog repository
//!
//! Both operations swallow store errors after logging them:
//! - list: failure comes back as the [`ListFailure`] sentinel
//! - remove: failure comes back as [`RemovalOutcome::Failed`]

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::pool::{DbError, QueryExecutor, Statement, RECORD_COLUMN};
use crate::models::{Catalog, CatalogKey, CatalogRecord};

/// Diagnostic text carried by a failed listing.
pub const LIST_FAILURE_SENTINEL: &str = "error, verifique os logs do servidor";

/// A listing could not be produced. Details are in the server log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("error, verifique os logs do servidor")]
pub struct ListFailure;

/// Result of removing one record by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Exactly one row was deleted
    Removed,
    /// The statement succeeded without deleting exactly one row
    NotRemoved,
    /// The statement raised an error
    Failed,
}

impl RemovalOutcome {
    /// Boolean view: `true` only when a row was deleted.
    pub fn is_removed(self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// List/remove access to one catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    fn catalog(&self) -> &'static Catalog;

    /// Every row of the catalog, fields untouched, in store order.
    async fn list_all(&self) -> Result<Vec<CatalogRecord>, ListFailure>;

    /// Delete the row with the given key. Attempted once, never retried.
    async fn remove_by_key(&self, key: &CatalogKey) -> RemovalOutcome;
}

/// Repository handle shared by the handlers of one catalog.
pub type SharedRepository = Arc<dyn CatalogRepository>;

/// [`CatalogRepository`] backed by the shared connection pool.
#[derive(Clone)]
pub struct CatalogRepo {
    pool: Arc<dyn QueryExecutor>,
    catalog: &'static Catalog,
}

impl CatalogRepo {
    pub fn new(pool: Arc<dyn QueryExecutor>, catalog: &'static Catalog) -> Self {
        Self { pool, catalog }
    }

    fn list_statement(&self) -> Statement {
        Statement::fetch(format!(
            r#"SELECT row_to_json(t) AS {} FROM "{}" t"#,
            RECORD_COLUMN, self.catalog.table
        ))
    }

    fn remove_statement(&self, key: &CatalogKey) -> Statement {
        Statement::execute(format!(
            r#"DELETE FROM "{}" WHERE "{}" = $1"#,
            self.catalog.table, self.catalog.key_column
        ))
        .bind(key.clone())
    }

    async fn fetch_records(&self) -> Result<Vec<CatalogRecord>, DbError> {
        self.pool.query(&self.list_statement()).await?.into_rows()
    }

    async fn delete_record(&self, key: &CatalogKey) -> Result<u64, DbError> {
        self.pool
            .query(&self.remove_statement(key))
            .await?
            .rows_affected()
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepo {
    fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    async fn list_all(&self) -> Result<Vec<CatalogRecord>, ListFailure> {
        match self.fetch_records().await {
            Ok(records) => {
                tracing::debug!(
                    catalog = self.catalog.prefix,
                    count = records.len(),
                    "listed records"
                );
                Ok(records)
            }
            Err(error) => {
                tracing::error!(catalog = self.catalog.prefix, %error, "failed to list records");
                Err(ListFailure)
            }
        }
    }

    async fn remove_by_key(&self, key: &CatalogKey) -> RemovalOutcome {
        let catalog = self.catalog.prefix;

        match self.delete_record(key).await {
            Ok(1) => {
                tracing::info!(catalog, %key, "record removed");
                RemovalOutcome::Removed
            }
            Ok(0) => {
                tracing::debug!(catalog, %key, "no record matched key");
                RemovalOutcome::NotRemoved
            }
            Ok(count) => {
                // Key column is expected to be the primary key
                tracing::error!(catalog, %key, count, "key matched more than one record");
                RemovalOutcome::NotRemoved
            }
            Err(error) => {
                tracing::error!(catalog, %key, %error, "failed to remove record");
                RemovalOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::QueryOutput;
    use crate::db::testing::ScriptedExecutor;
    use crate::models::{PLAYER_CARDS, SALES, TITLES};
    use serde_json::json;

    fn record(value: serde_json::Value) -> CatalogRecord {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn repo(executor: &Arc<ScriptedExecutor>, catalog: &'static Catalog) -> CatalogRepo {
        let pool: Arc<dyn QueryExecutor> = executor.clone();
        CatalogRepo::new(pool, catalog)
    }

    #[tokio::test]
    async fn list_returns_store_rows_verbatim() {
        let rows = vec![
            record(json!({
                "show_id": "s1",
                "type": "Movie",
                "title": "Breaking Bad",
                "director": "Vince Gilligan",
                "cast": "Bryan Cranston, Aaron Paul",
                "release_year": 2008,
                "rating": "TV-MA"
            })),
            record(json!({ "show_id": "s2", "type": "TV Show", "director": null })),
        ];
        let executor = Arc::new(ScriptedExecutor::new().reply(QueryOutput::Rows(rows.clone())));

        let listed = repo(&executor, &TITLES).list_all().await.unwrap();

        assert_eq!(listed, rows);
        let keys: Vec<_> = listed[0].keys().cloned().collect();
        assert_eq!(
            keys,
            ["show_id", "type", "title", "director", "cast", "release_year", "rating"]
        );
    }

    #[tokio::test]
    async fn list_selects_whole_table_as_json() {
        let executor = Arc::new(ScriptedExecutor::new().reply(QueryOutput::Rows(vec![])));

        let listed = repo(&executor, &SALES).list_all().await.unwrap();

        assert!(listed.is_empty());
        let statements = executor.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].sql(),
            r#"SELECT row_to_json(t) AS record FROM "venda_livros" t"#
        );
        assert!(statements[0].returns_rows());
    }

    #[tokio::test]
    async fn list_failure_is_the_sentinel() {
        let executor = Arc::new(ScriptedExecutor::new().fail());

        let err = repo(&executor, &PLAYER_CARDS).list_all().await.unwrap_err();

        assert_eq!(err, ListFailure);
        assert_eq!(err.to_string(), LIST_FAILURE_SENTINEL);
    }

    #[tokio::test]
    async fn remove_one_row_is_removed() {
        let executor = Arc::new(ScriptedExecutor::new().reply(QueryOutput::RowsAffected(1)));

        let outcome = repo(&executor, &TITLES).remove_by_key(&"s1".into()).await;

        assert_eq!(outcome, RemovalOutcome::Removed);
        assert!(outcome.is_removed());
        let statements = executor.statements();
        assert_eq!(
            statements[0].sql(),
            r#"DELETE FROM "netflix_titles" WHERE "show_id" = $1"#
        );
        assert_eq!(statements[0].params(), &[CatalogKey::Text("s1".into())]);
    }

    #[tokio::test]
    async fn remove_zero_rows_is_not_found() {
        let executor = Arc::new(ScriptedExecutor::new().reply(QueryOutput::RowsAffected(0)));

        let outcome = repo(&executor, &PLAYER_CARDS)
            .remove_by_key(&CatalogKey::Int(2))
            .await;

        assert_eq!(outcome, RemovalOutcome::NotRemoved);
        assert!(!outcome.is_removed());
        assert_eq!(
            executor.statements()[0].sql(),
            r#"DELETE FROM "players_cards" WHERE "playerid" = $1"#
        );
    }

    #[tokio::test]
    async fn remove_error_is_failed_and_not_retried() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .fail()
                .reply(QueryOutput::RowsAffected(1)),
        );

        let outcome = repo(&executor, &SALES).remove_by_key(&CatalogKey::Int(1)).await;

        assert_eq!(outcome, RemovalOutcome::Failed);
        assert!(!outcome.is_removed());
        assert_eq!(executor.statements().len(), 1);
    }

    #[tokio::test]
    async fn remove_matching_many_rows_is_not_removed() {
        let executor = Arc::new(ScriptedExecutor::new().reply(QueryOutput::RowsAffected(3)));

        let outcome = repo(&executor, &SALES).remove_by_key(&CatalogKey::Int(1)).await;

        assert_eq!(outcome, RemovalOutcome::NotRemoved);
        assert!(!outcome.is_removed());
    }

    #[tokio::test]
    async fn wrong_output_shape_is_a_failure() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .reply(QueryOutput::RowsAffected(4))
                .reply(QueryOutput::Rows(vec![])),
        );
        let repo = repo(&executor, &TITLES);

        assert_eq!(repo.list_all().await, Err(ListFailure));
        assert_eq!(
            repo.remove_by_key(&"s1".into()).await,
            RemovalOutcome::Failed
        );
    }
}
