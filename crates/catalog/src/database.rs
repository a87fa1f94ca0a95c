use sqlx::migrate::Migrator;
use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::errors::CatalogError;
use crate::models::{
    CatalogBrand, CatalogItem, CatalogType, NewCatalogBrand, NewCatalogItem, NewCatalogType,
};

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies any pending migrations. A no-op when the schema is current.
    pub async fn run_migrations(&self) -> Result<(), CatalogError> {
        info!("Running catalog migrations ({} known)", MIGRATOR.iter().count());
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Returns true if `table` has at least one row.
    ///
    /// `table` must be one of the catalog table names; it is interpolated
    /// into the query.
    pub async fn table_has_rows(&self, table: &str) -> Result<bool, CatalogError> {
        check_table(table)?;

        let exists: bool = sqlx::query_scalar(&format!("SELECT EXISTS (SELECT 1 FROM {table})"))
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Returns the ids in `table` in ascending order.
    ///
    /// Ids come from a sequence that is not rolled back with a failed
    /// transaction, so they need not start at 1 or be contiguous.
    pub async fn list_ids(&self, table: &str) -> Result<Vec<i32>, CatalogError> {
        check_table(table)?;

        let ids: Vec<i32> = sqlx::query_scalar(&format!("SELECT id FROM {table} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    pub async fn insert_brand(
        conn: &mut PgConnection,
        brand: &NewCatalogBrand,
    ) -> Result<i32, CatalogError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO catalog_brands (brand)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(&brand.brand)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    pub async fn insert_type(
        conn: &mut PgConnection,
        catalog_type: &NewCatalogType,
    ) -> Result<i32, CatalogError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO catalog_types (type)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(&catalog_type.kind)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    pub async fn insert_item(
        conn: &mut PgConnection,
        item: &NewCatalogItem,
    ) -> Result<i32, CatalogError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO catalog_items (catalog_type_id, catalog_brand_id, description, name,
                                       price, picture_uri)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(item.catalog_type_id)
        .bind(item.catalog_brand_id)
        .bind(&item.description)
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.picture_uri)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    pub async fn list_brands(&self) -> Result<Vec<CatalogBrand>, CatalogError> {
        let brands = sqlx::query_as(
            r#"
            SELECT id, brand
            FROM catalog_brands
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    pub async fn list_types(&self) -> Result<Vec<CatalogType>, CatalogError> {
        let types = sqlx::query_as(
            r#"
            SELECT id, type
            FROM catalog_types
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = sqlx::query_as(
            r#"
            SELECT id, catalog_type_id, catalog_brand_id, description, name,
                   price, picture_uri
            FROM catalog_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

fn check_table(table: &str) -> Result<(), CatalogError> {
    if matches!(table, "catalog_brands" | "catalog_types" | "catalog_items") {
        Ok(())
    } else {
        Err(CatalogError::InvalidInput(format!(
            "unknown catalog table: {table}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_table_rejects_unknown_names() {
        assert!(check_table("catalog_items").is_ok());
        assert!(matches!(
            check_table("users; DROP TABLE catalog_items"),
            Err(CatalogError::InvalidInput(_))
        ));
    }
}
