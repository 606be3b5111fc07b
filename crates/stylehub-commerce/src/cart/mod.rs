//! Shopping cart module.
//!
//! Contains the cart store, line items and order-total pricing.

mod cart;
mod pricing;

pub use cart::{CartLineItem, CartState, CartStore, LineItemKey};
pub use pricing::{compute_totals, convert_usd_to_inr, OrderTotals};
