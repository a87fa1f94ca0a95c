//! The reference catalog inserted into an empty database.
//!
//! The table is plain static data so the seeding logic can be exercised
//! against any [`SeedCatalog`]. Item rows reference brands and types by their
//! 1-based position in [`SeedCatalog::brands`] and [`SeedCatalog::types`].
//! Positions are mapped onto the ids the store actually assigned when the
//! item rows are built, since a sequence can be ahead of the row count.

use rust_decimal::Decimal;

use catalog::CatalogError;
use catalog::models::{NewCatalogBrand, NewCatalogItem, NewCatalogType};

/// A literal item row.
#[derive(Debug, Clone, Copy)]
pub struct SeedItem {
    pub type_ref: i32,
    pub brand_ref: i32,
    pub description: &'static str,
    pub name: &'static str,
    pub price_cents: u32,
    pub picture_uri: &'static str,
}

impl SeedItem {
    pub fn price(&self) -> Decimal {
        Decimal::new(i64::from(self.price_cents), 2)
    }
}

/// A versioned set of reference rows.
#[derive(Debug, Clone, Copy)]
pub struct SeedCatalog {
    pub version: u32,
    pub brands: &'static [&'static str],
    pub types: &'static [&'static str],
    pub items: &'static [SeedItem],
}

impl SeedCatalog {
    pub fn brand_rows(&self) -> Vec<NewCatalogBrand> {
        self.brands.iter().copied().map(NewCatalogBrand::new).collect()
    }

    pub fn type_rows(&self) -> Vec<NewCatalogType> {
        self.types.iter().copied().map(NewCatalogType::new).collect()
    }

    /// Builds the item rows, resolving each position against the stored ids.
    ///
    /// `brand_ids` and `type_ids` are the ids in the brand and type tables in
    /// ascending order; position `n` maps to the `n`-th id.
    pub fn item_rows(
        &self,
        brand_ids: &[i32],
        type_ids: &[i32],
    ) -> Result<Vec<NewCatalogItem>, CatalogError> {
        self.items
            .iter()
            .map(|item| {
                NewCatalogItem::new(
                    resolve(type_ids, item.type_ref, "type", item.name)?,
                    resolve(brand_ids, item.brand_ref, "brand", item.name)?,
                    item.description,
                    item.name,
                    item.price(),
                    item.picture_uri,
                )
            })
            .collect()
    }

    /// Checks that every item points at a brand and type defined in this catalog.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let brand_count = self.brands.len() as i32;
        let type_count = self.types.len() as i32;

        for item in self.items {
            if !(1..=brand_count).contains(&item.brand_ref) {
                return Err(CatalogError::InvalidInput(format!(
                    "item {:?} references unknown brand {}",
                    item.name, item.brand_ref
                )));
            }
            if !(1..=type_count).contains(&item.type_ref) {
                return Err(CatalogError::InvalidInput(format!(
                    "item {:?} references unknown type {}",
                    item.name, item.type_ref
                )));
            }
        }

        Ok(())
    }
}

fn resolve(ids: &[i32], position: i32, what: &str, item: &str) -> Result<i32, CatalogError> {
    usize::try_from(position)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|i| ids.get(i).copied())
        .ok_or_else(|| {
            CatalogError::InvalidInput(format!(
                "item {item:?} references {what} {position}, but only {} are stored",
                ids.len()
            ))
        })
}

/// The outdoor apparel catalog shipped with the application.
pub const CATALOG: SeedCatalog = SeedCatalog {
    version: 1,
    brands: BRANDS,
    types: TYPES,
    items: ITEMS,
};

const BRANDS: &[&str] = &["Patagonia", "Carhartt", "Columbia", "Under Armour"];

const TYPES: &[&str] = &["Pants", "Shirts", "Hats", "Socks"];

const ITEMS: &[SeedItem] = &[
    SeedItem {
        type_ref: 1,
        brand_ref: 1,
        description: "Patagonia Comfortable slim-fit pants",
        name: "Patagonia Slim Pants",
        price_cents: 4999,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dwf6f754e0/images/hi-res/82960_TRBN.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 1,
        brand_ref: 2,
        description: "Carhartt Relaxed-fit casual pants",
        name: "Carhartt Casual Pants",
        price_cents: 5499,
        picture_uri: "https://m.media-amazon.com/images/I/51Xobp1R+GL._AC_UY1000_.jpg",
    },
    SeedItem {
        type_ref: 1,
        brand_ref: 3,
        description: "Columbia Water-resistant hiking pants",
        name: "Columbia Hiking Pants",
        price_cents: 6999,
        picture_uri: "https://columbia.scene7.com/is/image/ColumbiaSportswear2/1531481_464_f?wid=768&hei=806&v=1732784020",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 4,
        description: "Under Armour Soft cotton T-shirt",
        name: "Under Armour Basic T-Shirt",
        price_cents: 1999,
        picture_uri: "https://underarmour.scene7.com/is/image/Underarmour/V5-1388408-410_FC?rp=standard-0pad%7CpdpMainDesktop&scl=1&fmt=jpg&qlt=85&resMode=sharp2&cache=on%2Con&bgc=F0F0F0&wid=566&hei=708&size=566%2C708",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 1,
        description: "Patagonia Graphic printed T-shirt",
        name: "Patagonia Graphic T-Shirt",
        price_cents: 2499,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dw28c44952/images/hi-res/45235_UFSX.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 2,
        description: "Carhartt V-neck T-shirt for casual wear",
        name: "Carhartt V-Neck T-Shirt",
        price_cents: 2299,
        picture_uri: "https://m.media-amazon.com/images/I/71BSKrvoDfL._AC_UY1000_.jpg",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 3,
        description: "Columbia Long sleeve T-shirt for cool weather",
        name: "Columbia Long Sleeve T-Shirt",
        price_cents: 2999,
        picture_uri: "https://columbia.scene7.com/is/image/ColumbiaSportswear2/2013431_414_f_om?wid=768&hei=806&v=1732784020",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 4,
        description: "Under Armour Classic baseball cap",
        name: "Under Armour Baseball Hat",
        price_cents: 1599,
        picture_uri: "https://i8.amplience.net/t/jpl/jd_product_list?plu=jd_527168_al&qlt=85&qlt=92&w=320&h=320&v=1&fmt=auto",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 1,
        description: "Patagonia Knitted winter beanie",
        name: "Patagonia Winter Beanie",
        price_cents: 1899,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dw7e69b343/images/hi-res/29187_SKBR.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 2,
        description: "Carhartt Wide-brim sun hat",
        name: "Carhartt Sun Hat",
        price_cents: 2599,
        picture_uri: "https://m.media-amazon.com/images/I/51T6akK+IhL._AC_UY1000_.jpg",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 3,
        description: "Columbia Bucket hat for casual style",
        name: "Columbia Bucket Hat",
        price_cents: 2199,
        picture_uri: "https://columbia.scene7.com/is/image/ColumbiaSportswear2/2032081_608_f_tt?wid=768&hei=806&v=1732784020",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 4,
        description: "Under Armour Cotton ankle socks (3-pack)",
        name: "Under Armour Ankle Socks",
        price_cents: 999,
        picture_uri: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcT1-nJU4BH8WxSaOTjaCScP8Dw13WrjdxPmsQ&s",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 1,
        description: "Patagonia Wool thermal socks",
        name: "Patagonia Thermal Socks",
        price_cents: 1499,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dwd85a43f5/images/hi-res/50151_BCW.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 2,
        description: "Carhartt Sports crew socks",
        name: "Carhartt Crew Socks",
        price_cents: 1299,
        picture_uri: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQQHvu2kVcOhRoqZDXaqHT0GODt1dGfefLq7Q&s",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 3,
        description: "Columbia No-show socks for casual wear",
        name: "Columbia No-Show Socks",
        price_cents: 1099,
        picture_uri: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcTXh7qTGV7hcRt9mdbjvjx1Ch_u9LRiGGMuPA&s",
    },
    SeedItem {
        type_ref: 1,
        brand_ref: 1,
        description: "Patagonia Chino pants with a tapered fit",
        name: "Patagonia Chino Pants",
        price_cents: 5999,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dw1ee3df89/images/hi-res/22120_COI.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 1,
        brand_ref: 2,
        description: "Carhartt Joggers with elastic cuffs",
        name: "Carhartt Joggers",
        price_cents: 4499,
        picture_uri: "https://apim.marks.com/v1/product/api/v1/product/image/79121009f?baseStoreId=MKS&lang=en_CA&subscription-key=c01ef3612328420c9f5cd9277e815a0e&imwidth=640&impolicy=mZoom",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 4,
        description: "Under Armour Crewneck T-shirt with a soft feel",
        name: "Under Armour Crewneck T-Shirt",
        price_cents: 2199,
        picture_uri: "https://underarmour.scene7.com/is/image/Underarmour/V5-1381688-110_FC?rp=standard-0pad%7CpdpMainDesktop&scl=1&fmt=jpg&qlt=85&resMode=sharp2&cache=on%2Con&bgc=F0F0F0&wid=566&hei=708&size=566%2C708",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 1,
        description: "Patagonia Stylish fedora hat",
        name: "Patagonia Fedora Hat",
        price_cents: 3499,
        picture_uri: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS_yvqMKK12mgf-6xPOqXxsPe_E4n0pqB5P1g&s",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 2,
        description: "Carhartt Compression socks for support",
        name: "Carhartt Compression Socks",
        price_cents: 1999,
        picture_uri: "https://s0.metrouniforms.com/images/P/A677Navy.jpg",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 3,
        description: "Columbia Fleece-lined trapper hat",
        name: "Columbia Trapper Hat",
        price_cents: 2999,
        picture_uri: "https://columbia.scene7.com/is/image/ColumbiaSportswear2/2093451_010_f_pu?wid=768&hei=806&v=1732784020",
    },
    SeedItem {
        type_ref: 1,
        brand_ref: 4,
        description: "Under Armour Cargo pants with multiple pockets",
        name: "Under Armour Cargo Pants",
        price_cents: 6499,
        picture_uri: "https://underarmour.scene7.com/is/image/Underarmour/V5-1379199-001_FC?rp=standard-0pad%7CpdpMainDesktop&scl=1&fmt=jpg&qlt=85&resMode=sharp2&cache=on%2Con&bgc=F0F0F0&wid=566&hei=708&size=566%2C708",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 1,
        description: "Patagonia Henley T-shirt with buttons",
        name: "Patagonia Henley T-Shirt",
        price_cents: 2699,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dwa286f831/images/hi-res/53115_BWX.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 1,
        brand_ref: 2,
        description: "Carhartt Formal dress pants",
        name: "Carhartt Dress Pants",
        price_cents: 7499,
        picture_uri: "https://catalog-resize-images.thedoublef.com/cabd41fc6ac03d50e482fb4ea284f57f/900/900/I031497CO_P_CARH-8902.a.jpg",
    },
    SeedItem {
        type_ref: 2,
        brand_ref: 3,
        description: "Columbia Muscle fit T-shirt",
        name: "Columbia Muscle Fit T-Shirt",
        price_cents: 2099,
        picture_uri: "https://columbia.scene7.com/is/image/ColumbiaSportswear2/1990751_010_f_om?wid=768&hei=806&v=1732784020",
    },
    SeedItem {
        type_ref: 3,
        brand_ref: 4,
        description: "Under Armour Classic top hat for formal occasions",
        name: "Under Armour Top Hat",
        price_cents: 4999,
        picture_uri: "https://underarmour.scene7.com/is/image/Underarmour/1361544-005_SLF_SL?rp=standard-0pad%7CpdpMainDesktop&scl=1&fmt=jpg&qlt=85&resMode=sharp2&cache=on%2Con&bgc=F0F0F0&wid=566&hei=708&size=566%2C708",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 1,
        description: "Patagonia Knee-high socks for boots",
        name: "Patagonia Knee-High Socks",
        price_cents: 1399,
        picture_uri: "https://www.patagonia.ca/dw/image/v2/BDJB_PRD/on/demandware.static/-/Sites-patagonia-master/default/dwc8c8d240/images/hi-res/50116_PSBU.jpg?sw=768&sh=768&sfrm=png&q=95&bgcolor=f5f5f5",
    },
    SeedItem {
        type_ref: 4,
        brand_ref: 2,
        description: "Carhartt Anti-blister running socks",
        name: "Carhartt Running Socks",
        price_cents: 1199,
        picture_uri: "https://images-na.ssl-images-amazon.com/images/I/81UHLmq7-SL._AC_SR462,693_.jpg",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_counts() {
        assert_eq!(CATALOG.brands.len(), 4);
        assert_eq!(CATALOG.types.len(), 4);
        assert_eq!(CATALOG.items.len(), 28);
    }

    #[test]
    fn test_catalog_references_are_valid() {
        CATALOG.validate().unwrap();
    }

    #[test]
    fn test_item_rows_carry_prices() {
        let rows = CATALOG.item_rows(&[1, 2, 3, 4], &[1, 2, 3, 4]).unwrap();

        assert_eq!(rows.len(), CATALOG.items.len());
        assert_eq!(rows[0].name, "Patagonia Slim Pants");
        assert_eq!(rows[0].price, Decimal::new(4999, 2));
        assert_eq!((rows[0].catalog_type_id, rows[0].catalog_brand_id), (1, 1));
        assert!(rows.iter().all(|r| !r.price.is_sign_negative()));
    }

    #[test]
    fn test_item_rows_follow_stored_ids() {
        // Types were inserted after a rolled-back attempt burned ids 1..=4.
        let rows = CATALOG.item_rows(&[1, 2, 3, 4], &[5, 6, 7, 8]).unwrap();

        // "Carhartt Casual Pants" is type 1, brand 2.
        assert_eq!(rows[1].catalog_type_id, 5);
        assert_eq!(rows[1].catalog_brand_id, 2);
        assert!(rows.iter().all(|r| (5..=8).contains(&r.catalog_type_id)));
    }

    #[test]
    fn test_item_rows_reject_missing_ids() {
        let result = CATALOG.item_rows(&[1, 2], &[1, 2, 3, 4]);

        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }

    #[test]
    fn test_brand_and_type_names_unique() {
        let brands: HashSet<_> = CATALOG.brands.iter().collect();
        let types: HashSet<_> = CATALOG.types.iter().collect();
        assert_eq!(brands.len(), CATALOG.brands.len());
        assert_eq!(types.len(), CATALOG.types.len());
    }

    #[test]
    fn test_validate_rejects_dangling_brand() {
        const BROKEN: SeedCatalog = SeedCatalog {
            version: 0,
            brands: &["Only"],
            types: &["Thing"],
            items: &[SeedItem {
                type_ref: 1,
                brand_ref: 2,
                description: "Orphan",
                name: "Orphan",
                price_cents: 100,
                picture_uri: "",
            }],
        };

        assert!(matches!(
            BROKEN.validate(),
            Err(CatalogError::InvalidInput(_))
        ));
    }
}
