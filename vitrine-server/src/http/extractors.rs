//! Custom Axum extractors

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::db::repos::SharedRepository;
use crate::models::CatalogKey;

/// Key of the record to remove, read from the query parameter named after
/// the catalog's key column and coerced to the catalog's key type.
///
/// A missing or malformed key can't match any row, so it is rejected the
/// same way as a key that matched nothing.
#[derive(Debug)]
pub struct RemovalKey(pub CatalogKey);

impl FromRequestParts<SharedRepository> for RemovalKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        repo: &SharedRepository,
    ) -> Result<Self, Self::Rejection> {
        let catalog = repo.catalog();
        let rejected = ApiError::Rejected {
            message: catalog.rejected_message,
        };

        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, repo)
            .await
            .map_err(|rejection| {
                tracing::warn!(catalog = catalog.prefix, %rejection, "unreadable query string");
                rejected
            })?;

        catalog
            .parse_key(params.get(catalog.key_column).map(String::as_str))
            .map(Self)
            .map_err(|error| {
                tracing::warn!(catalog = catalog.prefix, %error, "invalid removal key");
                rejected
            })
    }
}
