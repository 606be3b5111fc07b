//! Product catalog module.
//!
//! The catalog is a read-only collaborator of the cart and checkout.

mod memory;
mod product;

pub use memory::InMemoryCatalog;
pub use product::Product;

use crate::error::CommerceError;
use crate::ids::ProductId;

/// Read-only product lookup.
pub trait Catalog {
    /// Look up a product by id.
    fn get(&self, id: &ProductId) -> Option<&Product>;

    /// All products in display order.
    fn products(&self) -> &[Product];

    /// Look up a product, failing if it does not exist.
    fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }
}
