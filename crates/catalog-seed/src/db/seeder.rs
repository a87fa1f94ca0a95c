//! Seeding runner with bounded retry.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use catalog::CatalogError;

use super::{CatalogStore, Collection};
use crate::config::SeedConfig;
use crate::data::{CATALOG, SeedCatalog};
use crate::logger::SeedLogger;

#[derive(Debug, Error)]
pub enum SeedError {
    /// Every attempt failed; carries the last store error.
    #[error("Seeding failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: CatalogError,
    },
    /// Seeding succeeded on a retry, reported because `reraise_after_recovery` is set.
    #[error("Seeding completed on attempt {attempts} after an earlier failure: {source}")]
    Recovered {
        attempts: u32,
        #[source]
        source: CatalogError,
    },
    /// The catalog references a brand or type it does not define. Never retried.
    #[error("Invalid seed catalog: {0}")]
    InvalidCatalog(CatalogError),
    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Rows inserted per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsertCounts {
    pub brands: usize,
    pub types: usize,
    pub items: usize,
}

impl InsertCounts {
    fn record(&mut self, collection: Collection, count: usize) {
        match collection {
            Collection::Brands => self.brands += count,
            Collection::Types => self.types += count,
            Collection::Items => self.items += count,
        }
    }

    pub fn total(&self) -> usize {
        self.brands + self.types + self.items
    }
}

/// Outcome of the attempt that succeeded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    /// Attempts made, the successful one included.
    pub attempts: u32,
    pub catalog_version: u32,
    pub inserted: InsertCounts,
    /// Collections left alone because they already had rows.
    pub skipped: Vec<Collection>,
}

/// Seeds the reference catalog into a [`CatalogStore`].
pub struct SeedRunner<L> {
    config: SeedConfig,
    logger: L,
    catalog: SeedCatalog,
}

impl<L: SeedLogger> SeedRunner<L> {
    pub fn new(config: SeedConfig, logger: L) -> Self {
        Self {
            config,
            logger,
            catalog: CATALOG,
        }
    }

    /// Seeds a different catalog instead of the built-in one.
    pub fn with_catalog(mut self, catalog: SeedCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Runs the seeding sequence, retrying the whole sequence on any store failure.
    ///
    /// Each failed attempt except the last is passed to the logger before the
    /// next one starts. Retries are immediate.
    pub async fn seed<S>(&self, store: &mut S) -> Result<SeedReport, SeedError>
    where
        S: CatalogStore + ?Sized,
    {
        self.catalog.validate().map_err(SeedError::InvalidCatalog)?;

        let max_attempts = self.config.max_retries.saturating_add(1);
        let mut first_failure: Option<CatalogError> = None;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, "Starting seed attempt");

            match self.run_attempt(store).await {
                Ok(mut report) => {
                    report.attempts = attempt;

                    if self.config.reraise_after_recovery
                        && let Some(source) = first_failure
                    {
                        return Err(SeedError::Recovered {
                            attempts: attempt,
                            source,
                        });
                    }

                    info!(
                        attempts = attempt,
                        inserted = report.inserted.total(),
                        "Catalog seeding complete"
                    );
                    return Ok(report);
                }
                Err(e) if attempt >= max_attempts => {
                    return Err(SeedError::Exhausted {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    debug!(
                        attempt,
                        connectivity = e.is_connectivity(),
                        "Seed attempt failed, retrying"
                    );
                    self.logger.log_error(&e.to_string());
                    first_failure.get_or_insert(e);
                }
            }
        }
    }

    async fn run_attempt<S>(&self, store: &mut S) -> Result<SeedReport, CatalogError>
    where
        S: CatalogStore + ?Sized,
    {
        if self.config.apply_migrations && store.supports_migrations() {
            store.apply_migrations().await?;
        }

        let mut report = SeedReport {
            catalog_version: self.catalog.version,
            ..SeedReport::default()
        };

        for collection in Collection::SEED_ORDER {
            if !store.is_empty(collection).await? {
                info!("Skipping {} (already populated)", collection);
                report.skipped.push(collection);
                continue;
            }

            let count = match collection {
                Collection::Brands => {
                    let rows = self.catalog.brand_rows();
                    store.insert_brands(&rows).await?;
                    rows.len()
                }
                Collection::Types => {
                    let rows = self.catalog.type_rows();
                    store.insert_types(&rows).await?;
                    rows.len()
                }
                Collection::Items => {
                    let brand_ids = store.ids(Collection::Brands).await?;
                    let type_ids = store.ids(Collection::Types).await?;
                    let rows = self.catalog.item_rows(&brand_ids, &type_ids)?;
                    store.insert_items(&rows).await?;
                    rows.len()
                }
            };
            store.commit().await?;

            info!("Seeded {} {}", count, collection);
            report.inserted.record(collection, count);
        }

        Ok(report)
    }
}

/// Seeds the built-in catalog with the default configuration.
pub async fn seed<S, L>(store: &mut S, logger: L) -> Result<SeedReport, SeedError>
where
    S: CatalogStore + ?Sized,
    L: SeedLogger,
{
    SeedRunner::new(SeedConfig::default(), logger)
        .seed(store)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::logger::RecordingLogger;

    fn runner(config: SeedConfig, logger: &RecordingLogger) -> SeedRunner<&RecordingLogger> {
        SeedRunner::new(config, logger)
    }

    #[tokio::test]
    async fn test_seed_empty_store_reports_counts() {
        let logger = RecordingLogger::new();
        let mut store = InMemoryStore::new();

        let report = runner(SeedConfig::default(), &logger)
            .seed(&mut store)
            .await
            .unwrap();

        assert_eq!(report.attempts, 1);
        assert_eq!(report.catalog_version, CATALOG.version);
        assert_eq!(
            report.inserted,
            InsertCounts {
                brands: 4,
                types: 4,
                items: 28
            }
        );
        assert!(report.skipped.is_empty());
        assert!(logger.is_empty());
    }

    #[tokio::test]
    async fn test_failed_migration_is_retried() {
        let logger = RecordingLogger::new();
        // First failure hits the migration call itself.
        let mut store = InMemoryStore::new().with_migrations().fail_next(1);

        let report = runner(SeedConfig::default(), &logger)
            .seed(&mut store)
            .await
            .unwrap();

        assert_eq!(report.attempts, 2);
        assert_eq!(store.migrations_applied(), 1);
        assert_eq!(logger.len(), 1);
    }

    #[tokio::test]
    async fn test_migrations_skipped_when_disabled() {
        let logger = RecordingLogger::new();
        let mut store = InMemoryStore::new().with_migrations();

        runner(SeedConfig::default().with_migrations(false), &logger)
            .seed(&mut store)
            .await
            .unwrap();

        assert_eq!(store.migrations_applied(), 0);
    }

    #[tokio::test]
    async fn test_zero_retries_fails_on_first_error() {
        let logger = RecordingLogger::new();
        let mut store = InMemoryStore::new().fail_next(1);

        let err = runner(SeedConfig::default().with_max_retries(0), &logger)
            .seed(&mut store)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Exhausted { attempts: 1, .. }));
        assert!(logger.is_empty());
    }

    #[tokio::test]
    async fn test_reraise_after_recovery_surfaces_first_failure() {
        let logger = RecordingLogger::new();
        let mut store = InMemoryStore::new().fail_next(2);

        let err = runner(
            SeedConfig::default().with_reraise_after_recovery(true),
            &logger,
        )
        .seed(&mut store)
        .await
        .unwrap_err();

        match err {
            SeedError::Recovered { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(source.to_string().contains("call 1"));
            }
            other => panic!("expected recovered error, got {other:?}"),
        }
        // The data still landed.
        assert_eq!(store.items().len(), 28);
        assert_eq!(logger.len(), 2);
    }

    #[tokio::test]
    async fn test_reraise_flag_ignored_without_failure() {
        let logger = RecordingLogger::new();
        let mut store = InMemoryStore::new();

        let report = runner(
            SeedConfig::default().with_reraise_after_recovery(true),
            &logger,
        )
        .seed(&mut store)
        .await
        .unwrap();

        assert_eq!(report.attempts, 1);
    }

    #[tokio::test]
    async fn test_invalid_catalog_is_not_retried() {
        const BROKEN: SeedCatalog = SeedCatalog {
            version: 99,
            brands: &[],
            types: &["Thing"],
            items: &[crate::data::SeedItem {
                type_ref: 1,
                brand_ref: 1,
                description: "Orphan",
                name: "Orphan",
                price_cents: 100,
                picture_uri: "",
            }],
        };
        let logger = RecordingLogger::new();
        let mut store = InMemoryStore::new();

        let err = runner(SeedConfig::default(), &logger)
            .with_catalog(BROKEN)
            .seed(&mut store)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::InvalidCatalog(_)));
        assert_eq!(store.calls(), 0);
    }
}
