//! Embedded demo data

use crate::models::{Artisan, Product};
use anyhow::{Context, Result};

const PRODUCTS_YAML: &str = include_str!("seed/products.yml");
const ARTISANS_YAML: &str = include_str!("seed/artisans.yml");

/// Demo products in display order
pub fn products() -> Result<Vec<Product>> {
    serde_yaml::from_str(PRODUCTS_YAML).context("Failed to parse embedded product seed data")
}

/// Demo artisan profiles
pub fn artisans() -> Result<Vec<Artisan>> {
    serde_yaml::from_str(ARTISANS_YAML).context("Failed to parse embedded artisan seed data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldValue, Record};

    #[test]
    fn test_seed_products_parse() {
        let products = products().unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[0].price, 89.99);
        assert_eq!(products[2].field("price"), Some(FieldValue::Number(234.5)));
        assert!(products.iter().all(|p| p.in_stock));
        assert_eq!(products.iter().filter(|p| p.featured).count(), 3);
    }

    #[test]
    fn test_seed_artisans_parse() {
        let artisans = artisans().unwrap();
        assert_eq!(artisans.len(), 6);
        assert_eq!(artisans[1].rating.count, 89);
        assert!(artisans.iter().all(|a| a.verified));
        assert!(artisans[0].description.starts_with("Traditional pottery maker"));
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let products = products().unwrap();
        let mut ids: Vec<&str> = products.iter().map(|p| p.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }
}
