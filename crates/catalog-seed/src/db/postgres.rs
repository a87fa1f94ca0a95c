//! PostgreSQL-backed catalog store.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};

use catalog::models::{NewCatalogBrand, NewCatalogItem, NewCatalogType};
use catalog::{CatalogError, Database};

use super::{CatalogStore, Collection};

/// Catalog store over a PostgreSQL pool.
///
/// The first insert after a commit opens a transaction; [`commit`](CatalogStore::commit)
/// closes it. Dropping the store with a transaction still open rolls it back.
pub struct PgCatalogStore {
    db: Database,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgCatalogStore {
    pub fn new(db: Database) -> Self {
        Self { db, tx: None }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>, CatalogError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.db.pool().begin().await?,
        };
        Ok(self.tx.insert(tx))
    }

    /// Rolls back writes left staged by a failed attempt.
    async fn discard_staged(&mut self) -> Result<(), CatalogError> {
        if let Some(tx) = self.tx.take() {
            warn!("Rolling back uncommitted catalog writes");
            tx.rollback().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    fn supports_migrations(&self) -> bool {
        true
    }

    async fn apply_migrations(&mut self) -> Result<(), CatalogError> {
        self.discard_staged().await?;
        self.db.run_migrations().await
    }

    async fn is_empty(&mut self, collection: Collection) -> Result<bool, CatalogError> {
        // Every commit closes the transaction, so one still open here is left
        // over from a failed insert.
        self.discard_staged().await?;
        let has_rows = self.db.table_has_rows(collection.table_name()).await?;
        Ok(!has_rows)
    }

    async fn ids(&mut self, collection: Collection) -> Result<Vec<i32>, CatalogError> {
        self.discard_staged().await?;
        self.db.list_ids(collection.table_name()).await
    }

    async fn insert_brands(&mut self, rows: &[NewCatalogBrand]) -> Result<(), CatalogError> {
        let tx = self.transaction().await?;
        for row in rows {
            let id = Database::insert_brand(&mut **tx, row).await?;
            debug!(id, brand = %row.brand, "Staged brand");
        }
        Ok(())
    }

    async fn insert_types(&mut self, rows: &[NewCatalogType]) -> Result<(), CatalogError> {
        let tx = self.transaction().await?;
        for row in rows {
            let id = Database::insert_type(&mut **tx, row).await?;
            debug!(id, kind = %row.kind, "Staged type");
        }
        Ok(())
    }

    async fn insert_items(&mut self, rows: &[NewCatalogItem]) -> Result<(), CatalogError> {
        let tx = self.transaction().await?;
        for row in rows {
            let id = Database::insert_item(&mut **tx, row).await?;
            debug!(id, name = %row.name, "Staged item");
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), CatalogError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }
}
