//! Checkout module.
//!
//! Contains shipping validation, the payment state machine, the gateway
//! contract with its simulated implementation, and the checkout session that
//! drives a payment attempt end to end.

mod flow;
mod gateway;
mod prompt;
mod session;
mod shipping;

pub use flow::PaymentState;
pub use gateway::{
    MockGateway, MockOrder, MockPaymentResult, PaymentDecision, PaymentGateway, PaymentRequest,
    PAYMENT_FAILED_CODE, USER_CANCELLED_CODE,
};
pub use prompt::{ChannelPrompt, DecisionPrompt, FixedDecision, PendingDecision};
pub use session::{CheckoutSession, OrderConfirmation};
pub use shipping::{validate_shipping, ShippingInfo};
