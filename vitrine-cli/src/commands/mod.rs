//! Command implementations for the vitrine CLI

pub mod serve;

pub use serve::run_serve;
