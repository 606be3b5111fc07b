//! In-memory catalog with the storefront's seed data.

use super::{Catalog, Product};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's launch collection.
    pub fn seed() -> Self {
        let usd = |amount: f64| Money::from_decimal(amount, Currency::USD);
        let mut products = vec![
            Product::new("1", "Classic White Cotton T-Shirt", usd(29.99))
                .with_original_price(usd(39.99))
                .with_category("tops", "t-shirts")
                .with_sizes(["XS", "S", "M", "L", "XL"])
                .with_colors(["White", "Black", "Gray"]),
            Product::new("2", "Slim Fit Denim Jeans", usd(89.99))
                .with_category("bottoms", "jeans")
                .with_sizes(["28", "30", "32", "34", "36"])
                .with_colors(["Blue", "Black", "Light Blue"]),
            Product::new("3", "Elegant Silk Blouse", usd(149.99))
                .with_category("tops", "blouses")
                .with_sizes(["XS", "S", "M", "L"])
                .with_colors(["Cream", "Navy", "Burgundy"]),
            Product::new("4", "Casual Summer Dress", usd(79.99))
                .with_category("dresses", "casual")
                .with_sizes(["XS", "S", "M", "L", "XL"])
                .with_colors(["Floral", "Solid Blue", "White"]),
            Product::new("5", "Wool Blend Sweater", usd(119.99))
                .with_category("tops", "sweaters")
                .with_sizes(["S", "M", "L", "XL"])
                .with_colors(["Charcoal", "Cream", "Navy"]),
            Product::new("6", "Formal Blazer", usd(199.99))
                .with_category("outerwear", "blazers")
                .with_sizes(["XS", "S", "M", "L", "XL"])
                .with_colors(["Black", "Navy", "Gray"]),
            Product::new("7", "Athletic Leggings", usd(49.99))
                .with_category("activewear", "leggings")
                .with_sizes(["XS", "S", "M", "L", "XL"])
                .with_colors(["Black", "Navy", "Gray", "Burgundy"]),
            Product::new("8", "Vintage Leather Jacket", usd(299.99))
                .with_category("outerwear", "jackets")
                .with_sizes(["S", "M", "L", "XL"])
                .with_colors(["Black", "Brown"]),
        ];

        let details: [(&str, f32, u32, bool, bool); 8] = [
            ("Premium cotton t-shirt with a classic fit. Perfect for everyday wear.", 4.5, 124, true, true),
            ("Modern slim fit jeans with premium denim construction.", 4.3, 89, false, true),
            ("Luxurious silk blouse perfect for professional settings.", 4.7, 45, true, false),
            ("Light and airy summer dress perfect for warm weather.", 4.6, 78, false, true),
            ("Cozy wool blend sweater for cooler weather.", 4.4, 67, false, false),
            ("Tailored blazer perfect for business and formal occasions.", 4.8, 34, true, false),
            ("High-performance leggings for workouts and active lifestyle.", 4.5, 156, false, true),
            ("Premium leather jacket with vintage styling.", 4.9, 23, true, false),
        ];
        for (product, (description, rating, reviews, is_new, featured)) in
            products.iter_mut().zip(details)
        {
            product.description = description.to_string();
            product.rating = rating;
            product.review_count = reviews;
            product.is_new = is_new;
            product.is_featured = featured;
        }

        Self::new(products)
    }

    /// Featured products, in display order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_featured)
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommerceError;

    #[test]
    fn test_seed_lookup() {
        let catalog = InMemoryCatalog::seed();
        assert_eq!(catalog.products().len(), 8);

        let tee = catalog.get(&ProductId::new("1")).unwrap();
        assert_eq!(tee.price, Money::usd(2999));
        assert_eq!(tee.discount_percent(), Some(25));
        assert!(tee.has_color("Black"));
    }

    #[test]
    fn test_require_missing_product() {
        let catalog = InMemoryCatalog::seed();
        let err = catalog.require(&ProductId::new("99")).unwrap_err();
        assert_eq!(err, CommerceError::ProductNotFound("99".to_string()));
    }

    #[test]
    fn test_featured() {
        let catalog = InMemoryCatalog::seed();
        let ids: Vec<&str> = catalog.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "7"]);
    }
}
