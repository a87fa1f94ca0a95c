//! Startup seeding for the catalog.
//!
//! Populates the brand, type and item tables with a fixed reference catalog
//! the first time the application starts against an empty database. Each
//! table is only seeded while it is empty, so repeated startups are
//! idempotent. When the database is not reachable yet (a container still
//! booting, say) the whole sequence is retried a bounded number of times.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_seed::prelude::*;
//!
//! let mut store = PgCatalogStore::new(Database::new(pool));
//! let report = SeedRunner::new(SeedConfig::from_env()?, TracingLogger)
//!     .seed(&mut store)
//!     .await?;
//! ```

pub mod config;
pub mod data;
pub mod db;
pub mod logger;

pub use catalog::models::{
    CatalogBrand, CatalogItem, CatalogType, NewCatalogBrand, NewCatalogItem, NewCatalogType,
};
pub use catalog::{CatalogError, Database};

/// Commonly used types for seeding.
pub mod prelude {
    pub use crate::config::SeedConfig;
    pub use crate::data::{CATALOG, SeedCatalog};
    pub use crate::db::{
        CatalogStore, Collection, InMemoryStore, PgCatalogStore, SeedError, SeedReport,
        SeedRunner, seed,
    };
    pub use crate::logger::{RecordingLogger, SeedLogger, TracingLogger};
    pub use catalog::{CatalogError, Database};
}
