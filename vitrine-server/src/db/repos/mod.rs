//! Repository implementations for database access
//!
//! A single generic repository serves every catalog:
//! - list issues one SELECT and returns rows in store order
//! - remove issues one parameterized DELETE and reads the affected-row count

pub mod catalog;

pub use catalog::{
    CatalogRepo, CatalogRepository, ListFailure, RemovalOutcome, SharedRepository,
    LIST_FAILURE_SENTINEL,
};
