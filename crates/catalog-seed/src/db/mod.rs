//! Store collaborators and the seeding runner.
//!
//! The [`SeedRunner`] only talks to a [`CatalogStore`]. [`PgCatalogStore`]
//! backs it with PostgreSQL; [`InMemoryStore`] is a deterministic stand-in
//! used for dry runs and tests.

mod memory;
mod postgres;
mod seeder;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use catalog::CatalogError;
use catalog::models::{NewCatalogBrand, NewCatalogItem, NewCatalogType};

pub use memory::InMemoryStore;
pub use postgres::PgCatalogStore;
pub use seeder::{InsertCounts, SeedError, SeedReport, SeedRunner, seed};

/// One of the seeded tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Brands,
    Types,
    Items,
}

impl Collection {
    /// Items reference brands and types, so those must be seeded first.
    pub const SEED_ORDER: [Collection; 3] = [Collection::Brands, Collection::Types, Collection::Items];

    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Brands => "catalog_brands",
            Collection::Types => "catalog_types",
            Collection::Items => "catalog_items",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Brands => "brands",
            Collection::Types => "types",
            Collection::Items => "items",
        };
        f.write_str(name)
    }
}

/// The operations seeding needs from a catalog store.
///
/// Inserts are staged until [`commit`](CatalogStore::commit) is called.
#[async_trait]
pub trait CatalogStore: Send {
    /// Whether [`apply_migrations`](CatalogStore::apply_migrations) does anything.
    fn supports_migrations(&self) -> bool {
        false
    }

    /// Applies pending schema migrations. A no-op when already current.
    async fn apply_migrations(&mut self) -> Result<(), CatalogError> {
        Ok(())
    }

    async fn is_empty(&mut self, collection: Collection) -> Result<bool, CatalogError>;

    /// Committed ids of `collection`, ascending.
    async fn ids(&mut self, collection: Collection) -> Result<Vec<i32>, CatalogError>;

    async fn insert_brands(&mut self, rows: &[NewCatalogBrand]) -> Result<(), CatalogError>;

    async fn insert_types(&mut self, rows: &[NewCatalogType]) -> Result<(), CatalogError>;

    async fn insert_items(&mut self, rows: &[NewCatalogItem]) -> Result<(), CatalogError>;

    /// Makes staged inserts durable.
    async fn commit(&mut self) -> Result<(), CatalogError>;
}
