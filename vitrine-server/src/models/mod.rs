//! Domain models with validation at construction
//!
//! Query-string input is coerced into typed keys here.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod catalog;

pub use validation::ValidationError;
pub use catalog::{Catalog, CatalogKey, CatalogRecord, KeyKind, PLAYER_CARDS, SALES, TITLES};
