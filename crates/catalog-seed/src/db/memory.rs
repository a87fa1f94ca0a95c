//! In-process catalog store.

use std::collections::{HashMap, HashSet};
use std::io;

use async_trait::async_trait;

use catalog::CatalogError;
use catalog::models::{
    CatalogBrand, CatalogItem, CatalogType, NewCatalogBrand, NewCatalogItem, NewCatalogType,
};

use super::{CatalogStore, Collection};

/// A catalog store held in memory.
///
/// Each table draws ids from its own sequence starting at 1, like a `SERIAL`
/// column. Ids are taken when a row is staged and are not given back when
/// staged rows are discarded, so a failed attempt leaves a gap just as it
/// would in PostgreSQL. Inserts stay staged until [`commit`](CatalogStore::commit);
/// a failed commit, or the next emptiness check or migration run, discards them.
/// Faults can be injected to simulate a database that is still starting.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    brands: Vec<CatalogBrand>,
    types: Vec<CatalogType>,
    items: Vec<CatalogItem>,

    staged_brands: Vec<CatalogBrand>,
    staged_types: Vec<CatalogType>,
    staged_items: Vec<CatalogItem>,

    sequences: HashMap<Collection, i32>,

    migrations_supported: bool,
    migrations_applied: usize,

    failures_remaining: usize,
    fail_on: HashSet<usize>,
    always_fail: bool,
    calls: usize,
    insert_calls: HashMap<Collection, usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the store report migration support and count migration runs.
    pub fn with_migrations(mut self) -> Self {
        self.migrations_supported = true;
        self
    }

    /// Makes the next `count` store calls fail with a connection error.
    pub fn fail_next(mut self, count: usize) -> Self {
        self.failures_remaining = count;
        self
    }

    /// Makes the `call`-th store call (1-based) fail with a connection error.
    pub fn fail_on_call(mut self, call: usize) -> Self {
        self.fail_on.insert(call);
        self
    }

    /// Makes every store call fail with a connection error.
    pub fn always_fail(mut self) -> Self {
        self.always_fail = true;
        self
    }

    /// Advances a table's id sequence, as rolled-back inserts would.
    pub fn with_sequence_at(mut self, collection: Collection, last_id: i32) -> Self {
        self.sequences.insert(collection, last_id);
        self
    }

    /// Adds committed brand rows directly, bypassing staging.
    pub fn with_brands(mut self, names: &[&str]) -> Self {
        for name in names {
            let id = self.next_id(Collection::Brands);
            self.brands.push(CatalogBrand {
                id,
                brand: name.to_string(),
            });
        }
        self
    }

    /// Adds committed type rows directly, bypassing staging.
    pub fn with_types(mut self, names: &[&str]) -> Self {
        for name in names {
            let id = self.next_id(Collection::Types);
            self.types.push(CatalogType {
                id,
                kind: name.to_string(),
            });
        }
        self
    }

    pub fn brands(&self) -> &[CatalogBrand] {
        &self.brands
    }

    pub fn types(&self) -> &[CatalogType] {
        &self.types
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of insert calls made for `collection`.
    pub fn insert_calls(&self, collection: Collection) -> usize {
        self.insert_calls.get(&collection).copied().unwrap_or(0)
    }

    /// Number of store calls made, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn migrations_applied(&self) -> usize {
        self.migrations_applied
    }

    fn next_id(&mut self, collection: Collection) -> i32 {
        let last = self.sequences.entry(collection).or_insert(0);
        *last += 1;
        *last
    }

    fn discard_staged(&mut self) {
        self.staged_brands.clear();
        self.staged_types.clear();
        self.staged_items.clear();
    }

    fn check_available(&mut self) -> Result<(), CatalogError> {
        self.calls += 1;

        let scheduled = self.fail_on.remove(&self.calls);
        if self.always_fail || scheduled || self.failures_remaining > 0 {
            if !scheduled {
                self.failures_remaining = self.failures_remaining.saturating_sub(1);
            }
            return Err(CatalogError::Database(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("connection refused (call {})", self.calls),
            ))));
        }

        Ok(())
    }

    fn record_insert(&mut self, collection: Collection) {
        *self.insert_calls.entry(collection).or_insert(0) += 1;
    }

    fn has_brand(&self, id: i32) -> bool {
        self.brands
            .iter()
            .chain(&self.staged_brands)
            .any(|b| b.id == id)
    }

    fn has_type(&self, id: i32) -> bool {
        self.types
            .iter()
            .chain(&self.staged_types)
            .any(|t| t.id == id)
    }

    fn apply_staged(&mut self) -> Result<(), CatalogError> {
        if let Some(row) = self
            .staged_items
            .iter()
            .find(|row| !self.has_brand(row.catalog_brand_id) || !self.has_type(row.catalog_type_id))
        {
            return Err(CatalogError::InvalidInput(format!(
                "foreign key violation: item {:?} references brand {} / type {}",
                row.name, row.catalog_brand_id, row.catalog_type_id
            )));
        }

        self.brands.append(&mut self.staged_brands);
        self.types.append(&mut self.staged_types);
        self.items.append(&mut self.staged_items);
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    fn supports_migrations(&self) -> bool {
        self.migrations_supported
    }

    async fn apply_migrations(&mut self) -> Result<(), CatalogError> {
        self.discard_staged();
        self.check_available()?;
        self.migrations_applied += 1;
        Ok(())
    }

    async fn is_empty(&mut self, collection: Collection) -> Result<bool, CatalogError> {
        // Every commit clears the staging area, so rows still staged here are
        // left over from a failed attempt.
        self.discard_staged();
        self.check_available()?;

        let empty = match collection {
            Collection::Brands => self.brands.is_empty(),
            Collection::Types => self.types.is_empty(),
            Collection::Items => self.items.is_empty(),
        };
        Ok(empty)
    }

    async fn ids(&mut self, collection: Collection) -> Result<Vec<i32>, CatalogError> {
        self.check_available()?;

        let mut ids: Vec<i32> = match collection {
            Collection::Brands => self.brands.iter().map(|b| b.id).collect(),
            Collection::Types => self.types.iter().map(|t| t.id).collect(),
            Collection::Items => self.items.iter().map(|i| i.id).collect(),
        };
        ids.sort_unstable();
        Ok(ids)
    }

    async fn insert_brands(&mut self, rows: &[NewCatalogBrand]) -> Result<(), CatalogError> {
        self.check_available()?;
        self.record_insert(Collection::Brands);
        for row in rows {
            let id = self.next_id(Collection::Brands);
            self.staged_brands.push(CatalogBrand {
                id,
                brand: row.brand.clone(),
            });
        }
        Ok(())
    }

    async fn insert_types(&mut self, rows: &[NewCatalogType]) -> Result<(), CatalogError> {
        self.check_available()?;
        self.record_insert(Collection::Types);
        for row in rows {
            let id = self.next_id(Collection::Types);
            self.staged_types.push(CatalogType {
                id,
                kind: row.kind.clone(),
            });
        }
        Ok(())
    }

    async fn insert_items(&mut self, rows: &[NewCatalogItem]) -> Result<(), CatalogError> {
        self.check_available()?;
        self.record_insert(Collection::Items);
        for row in rows {
            let id = self.next_id(Collection::Items);
            self.staged_items.push(CatalogItem {
                id,
                catalog_type_id: row.catalog_type_id,
                catalog_brand_id: row.catalog_brand_id,
                description: row.description.clone(),
                name: row.name.clone(),
                price: row.price,
                picture_uri: row.picture_uri.clone(),
            });
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), CatalogError> {
        let result = self.check_available().and_then(|()| self.apply_staged());
        if result.is_err() {
            self.discard_staged();
        }
        result
    }
}
