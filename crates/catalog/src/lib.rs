//! Catalog data layer.
//!
//! Row models for catalog brands, types and items, the PostgreSQL
//! [`Database`](database::Database) handle, and the embedded schema migrations.

pub mod database;
pub mod errors;
pub mod models;

pub use database::{Database, MIGRATOR};
pub use errors::CatalogError;
