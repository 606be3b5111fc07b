//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Immutable once loaded. Prices are in USD.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Pre-discount price, when the product is on sale.
    pub original_price: Option<Money>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category slug (e.g., "tops").
    pub category: String,
    /// Subcategory slug (e.g., "t-shirts").
    pub subcategory: String,
    /// Description.
    pub description: String,
    /// Available sizes, in display order.
    pub sizes: Vec<String>,
    /// Available colors, in display order.
    pub colors: Vec<String>,
    /// Whether the product can be purchased.
    pub in_stock: bool,
    /// Average rating out of 5.
    pub rating: f32,
    pub review_count: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    /// Create an in-stock product with no variants.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            images: Vec::new(),
            category: String::new(),
            subcategory: String::new(),
            description: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            is_new: false,
            is_featured: false,
        }
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        self.category = category.into();
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if the product is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|original| original.amount_minor > self.price.amount_minor)
            .unwrap_or(false)
    }

    /// Whole-percent discount against the original price.
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price?;
        if !self.is_on_sale() || original.amount_minor == 0 {
            return None;
        }
        let saved = original.amount_minor - self.price.amount_minor;
        Some(((saved as f64 / original.amount_minor as f64) * 100.0).round() as u8)
    }
}
