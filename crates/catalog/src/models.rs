use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CatalogBrand {
    pub id: i32,
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CatalogType {
    pub id: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CatalogItem {
    pub id: i32,
    pub catalog_type_id: i32,
    pub catalog_brand_id: i32,
    pub description: String,
    pub name: String,
    pub price: Decimal,
    pub picture_uri: String,
}

/// A brand row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogBrand {
    pub brand: String,
}

impl NewCatalogBrand {
    pub fn new(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
        }
    }
}

/// A type row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogType {
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewCatalogType {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// An item row before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCatalogItem {
    pub catalog_type_id: i32,
    pub catalog_brand_id: i32,
    pub description: String,
    pub name: String,
    pub price: Decimal,
    pub picture_uri: String,
}

impl NewCatalogItem {
    /// Builds an item row, rejecting negative prices.
    pub fn new(
        catalog_type_id: i32,
        catalog_brand_id: i32,
        description: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        picture_uri: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(CatalogError::InvalidInput(format!(
                "price must be non-negative, got {price}"
            )));
        }

        Ok(Self {
            catalog_type_id,
            catalog_brand_id,
            description: description.into(),
            name: name.into(),
            price,
            picture_uri: picture_uri.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_accepts_zero_and_positive_prices() {
        let free = NewCatalogItem::new(1, 1, "Sticker", "Sticker", Decimal::ZERO, "https://x/1.png");
        assert!(free.is_ok());

        let item = NewCatalogItem::new(
            2,
            3,
            "Wool socks",
            "Socks",
            Decimal::new(1499, 2),
            "https://x/2.png",
        )
        .unwrap();
        assert_eq!(item.catalog_type_id, 2);
        assert_eq!(item.catalog_brand_id, 3);
        assert_eq!(item.price.to_string(), "14.99");
    }

    #[test]
    fn test_new_item_rejects_negative_price() {
        let result = NewCatalogItem::new(1, 1, "Refund", "Refund", Decimal::new(-100, 2), "");
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }
}
