//! Cart store and line item types.

use crate::catalog::Product;
use crate::config::PricingConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identity of a line item: one per product/size/color combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineItemKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }

    fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product_id == product_id && self.size == size && self.color == color
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product snapshot taken when the item was added.
    pub product: Product,
    pub selected_size: String,
    pub selected_color: String,
    /// Always at least 1.
    pub quantity: i64,
}

impl CartLineItem {
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(
            self.product.id.clone(),
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Option<Money> {
        self.product.price.checked_mul(self.quantity)
    }

    fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product.id == product_id
            && self.selected_size == size
            && self.selected_color == color
    }
}

/// Immutable snapshot of the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    pub total: Money,
}

impl CartState {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(Currency::USD),
        }
    }

    /// Sum of quantities, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::empty()
    }
}

/// The shopper's cart for one browsing session.
///
/// Every mutation derives the next item list, recomputes the total from it
/// and only then commits both, so a failed call leaves the cart unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    state: CartState,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart.
    ///
    /// Adding an existing product/size/color combination increases its
    /// quantity. The caller is responsible for choosing a size and color the
    /// product actually offers.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let size = size.into();
        let color = color.into();

        let mut items = self.state.items.clone();
        if let Some(existing) = items
            .iter_mut()
            .find(|i| i.matches(&product.id, &size, &color))
        {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
        } else {
            items.push(CartLineItem {
                product: product.clone(),
                selected_size: size.clone(),
                selected_color: color.clone(),
                quantity,
            });
        }

        self.commit(items)?;
        debug!(
            product_id = %product.id,
            %size,
            %color,
            quantity,
            total = %self.state.total,
            "cart item added"
        );
        Ok(())
    }

    /// Remove the matching item. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str, color: &str) -> bool {
        let before = self.state.items.len();
        self.state.items.retain(|i| !i.matches(product_id, size, color));
        let removed = self.state.items.len() < before;
        self.state.total = saturating_total(&self.state.items);
        if removed {
            debug!(%product_id, size, color, total = %self.state.total, "cart item removed");
        }
        removed
    }

    /// Set an item's quantity exactly.
    ///
    /// A quantity of zero or less removes the item. Returns whether an item
    /// matched.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id, size, color));
        }

        let mut items = self.state.items.clone();
        let Some(item) = items.iter_mut().find(|i| i.matches(product_id, size, color)) else {
            return Ok(false);
        };
        item.quantity = quantity;

        self.commit(items)?;
        debug!(%product_id, size, color, quantity, total = %self.state.total, "cart quantity updated");
        Ok(true)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.state = CartState::empty();
        debug!("cart cleared");
    }

    /// Sum of quantities across all items.
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.state.items.len()
    }

    /// Sum of price times quantity across all items.
    pub fn total(&self) -> Money {
        self.state.total
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CartState {
        self.state.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn get(&self, key: &LineItemKey) -> Option<&CartLineItem> {
        self.state
            .items
            .iter()
            .find(|i| key.matches(&i.product.id, &i.selected_size, &i.selected_color))
    }

    /// How much more the shopper must add to qualify for free shipping.
    pub fn amount_until_free_shipping(&self, pricing: &PricingConfig) -> Option<Money> {
        super::pricing::amount_until_free_shipping(self.state.total, pricing)
    }

    fn commit(&mut self, items: Vec<CartLineItem>) -> Result<(), CommerceError> {
        let total = checked_total(&items)?;
        self.state = CartState { items, total };
        Ok(())
    }
}

fn checked_total(items: &[CartLineItem]) -> Result<Money, CommerceError> {
    items.iter().try_fold(Money::zero(Currency::USD), |acc, item| {
        let line = item.line_total().ok_or(CommerceError::Overflow)?;
        if line.currency != acc.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: acc.currency.code().to_string(),
                got: line.currency.code().to_string(),
            });
        }
        acc.checked_add(&line).ok_or(CommerceError::Overflow)
    })
}

/// Removing lines from a committed cart cannot overflow, so the saturating
/// sum always equals the checked one here.
fn saturating_total(items: &[CartLineItem]) -> Money {
    let cents = items.iter().fold(0i64, |acc, item| {
        acc.saturating_add(item.product.price.amount_minor.saturating_mul(item.quantity))
    });
    Money::usd(cents)
}
