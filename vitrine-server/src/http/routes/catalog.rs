//! Catalog endpoints
//!
//! Each catalog gets the same pair of routes:
//! - `GET /{prefix}/todos` lists every record
//! - `DELETE /{prefix}/remover?{key_column}=...` removes one record

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};

use crate::db::repos::{RemovalOutcome, SharedRepository};
use crate::http::error::ApiError;
use crate::http::extractors::RemovalKey;
use crate::models::CatalogRecord;

/// GET /{prefix}/todos - list every record of the catalog
async fn list_records(
    State(repo): State<SharedRepository>,
) -> Result<Json<Vec<CatalogRecord>>, ApiError> {
    let records = repo.list_all().await?;
    Ok(Json(records))
}

/// DELETE /{prefix}/remover - remove one record by key
async fn remove_record(
    State(repo): State<SharedRepository>,
    RemovalKey(key): RemovalKey,
) -> Result<Json<&'static str>, ApiError> {
    let catalog = repo.catalog();

    match repo.remove_by_key(&key).await {
        RemovalOutcome::Removed => Ok(Json(catalog.removed_message)),
        RemovalOutcome::NotRemoved => Err(ApiError::Rejected {
            message: catalog.rejected_message,
        }),
        RemovalOutcome::Failed => Err(ApiError::Internal),
    }
}

/// Routes for the catalog served by `repo`
pub fn router<S>(repo: SharedRepository) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let catalog = repo.catalog();

    Router::new()
        .route(&catalog.list_path(), get(list_records))
        .route(&catalog.remove_path(), delete(remove_record))
        .with_state(repo)
}
