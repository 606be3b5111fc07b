//! Storefront core for StyleHub.
//!
//! - **Catalog**: products and the seeded in-memory catalog
//! - **Cart**: line items keyed by product, size and color, with a running total
//! - **Checkout**: shipping validation, order totals and the mock payment protocol
//!
//! # Example
//!
//! ```rust,ignore
//! use stylehub_commerce::prelude::*;
//!
//! let catalog = InMemoryCatalog::seed();
//! let tee = catalog.require(&ProductId::new("1"))?;
//!
//! let mut cart = CartStore::new();
//! cart.add_item(tee, "M", "Black", 2)?;
//!
//! let session = CheckoutSession::new(MockGateway::default(), CommerceConfig::default());
//! let totals = session.quote(&cart)?;
//! println!("Pay {}", totals.final_total_inr);
//!
//! let receipt = session
//!     .submit_checkout(&mut cart, &shipping, &FixedDecision(PaymentDecision::SimulateSuccess))
//!     .await?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

pub use error::{CheckoutError, CommerceError, ValidationError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CommerceConfig, GatewayConfig, PricingConfig, StoreConfig};
    pub use crate::error::{CheckoutError, CommerceError, ShippingField, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, InMemoryCatalog, Product};

    // Cart
    pub use crate::cart::{
        compute_totals, convert_usd_to_inr, CartLineItem, CartState, CartStore, LineItemKey,
        OrderTotals,
    };

    // Checkout
    pub use crate::checkout::{
        validate_shipping, ChannelPrompt, CheckoutSession, DecisionPrompt, FixedDecision,
        MockGateway, MockOrder, MockPaymentResult, OrderConfirmation, PaymentDecision,
        PaymentGateway, PaymentRequest, PaymentState, PendingDecision, ShippingInfo,
    };
}
