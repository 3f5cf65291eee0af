//! Product records

use super::{check_len, lenient, normalize_tags, present, price, ValidationError};
use crate::catalog::{FieldValue, Record, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MAX_TITLE: usize = 200;
const MAX_DESCRIPTION: usize = 2000;

fn default_currency() -> String {
    "USD".to_string()
}

fn default_status() -> String {
    "active".to_string()
}

fn default_true() -> bool {
    true
}

/// A craft item listed by an artisan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display name of the artisan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artisan: Option<String>,
    pub artisan_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(deserialize_with = "price::deserialize")]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Product {
    const KIND: RecordKind = RecordKind::Product;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn headline(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Text(&self.id)),
            "title" => Some(FieldValue::Text(&self.title)),
            "description" => Some(FieldValue::Text(&self.description)),
            "artisan" => self.artisan.as_deref().map(FieldValue::Text),
            "artisanId" => Some(FieldValue::Text(&self.artisan_id)),
            "location" => self.location.as_deref().map(FieldValue::Text),
            "category" => Some(FieldValue::Text(&self.category)),
            "subcategory" => self.subcategory.as_deref().map(FieldValue::Text),
            "status" => Some(FieldValue::Text(&self.status)),
            "tags" => Some(FieldValue::Tags(&self.tags)),
            "price" => Some(FieldValue::Number(self.price)),
            "rating" => Some(FieldValue::Number(self.rating)),
            "stockQuantity" => Some(FieldValue::Number(self.stock_quantity as f64)),
            "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
            "inStock" => Some(FieldValue::Flag(self.in_stock)),
            "featured" => Some(FieldValue::Flag(self.featured)),
            _ => None,
        }
    }
}

/// Payload for creating a product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub artisan_id: Option<String>,
    pub artisan: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "price::deserialize_opt")]
    pub price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stock_quantity: Option<u32>,
    pub dimensions: Option<Value>,
    pub weight: Option<Value>,
}

impl NewProduct {
    /// Validate and build a product. The id is left empty for the
    /// repository to assign.
    pub fn into_product(self, now: DateTime<Utc>) -> Result<Product, ValidationError> {
        let (Some(title), Some(description), Some(artisan_id), Some(category), Some(price)) = (
            present(self.title),
            present(self.description),
            present(self.artisan_id),
            present(self.category),
            self.price,
        ) else {
            return Err(ValidationError::Missing(
                "Title, description, artisan ID, category, and price are required",
            ));
        };

        check_len("Title", &title, MAX_TITLE)?;
        check_len("Description", &description, MAX_DESCRIPTION)?;

        let stock_quantity = self.stock_quantity.unwrap_or(0);

        Ok(Product {
            id: String::new(),
            title,
            description,
            artisan: present(self.artisan),
            artisan_id,
            location: present(self.location),
            category,
            subcategory: present(self.subcategory),
            price,
            currency: default_currency(),
            image: self.images.first().cloned(),
            images: self.images,
            tags: normalize_tags(self.tags),
            materials: self.materials,
            in_stock: stock_quantity > 0,
            stock_quantity,
            rating: 0.0,
            review_count: 0,
            featured: false,
            status: default_status(),
            dimensions: self.dimensions,
            weight: self.weight,
            created_at: now,
            updated_at: None,
        })
    }
}

/// Partial update for a product; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "price::deserialize_opt")]
    pub price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub materials: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stock_quantity: Option<u32>,
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub dimensions: Option<Value>,
    pub weight: Option<Value>,
}

impl ProductUpdate {
    /// Merge into `product`. Nothing is written if validation fails.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let title = present(self.title);
        let description = present(self.description);
        if let Some(title) = &title {
            check_len("Title", title, MAX_TITLE)?;
        }
        if let Some(description) = &description {
            check_len("Description", description, MAX_DESCRIPTION)?;
        }

        if let Some(title) = title {
            product.title = title;
        }
        if let Some(description) = description {
            product.description = description;
        }
        if let Some(location) = present(self.location) {
            product.location = Some(location);
        }
        if let Some(category) = present(self.category) {
            product.category = category;
        }
        if let Some(subcategory) = present(self.subcategory) {
            product.subcategory = Some(subcategory);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(images) = self.images {
            product.image = images.first().cloned();
            product.images = images;
        }
        if let Some(tags) = self.tags {
            product.tags = normalize_tags(tags);
        }
        if let Some(materials) = self.materials {
            product.materials = materials;
        }
        if let Some(quantity) = self.stock_quantity {
            product.stock_quantity = quantity;
            product.in_stock = quantity > 0;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        if let Some(status) = present(self.status) {
            product.status = status;
        }
        if self.dimensions.is_some() {
            product.dimensions = self.dimensions;
        }
        if self.weight.is_some() {
            product.weight = self.weight;
        }
        product.updated_at = Some(now);
        Ok(())
    }
}
