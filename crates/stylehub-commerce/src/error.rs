//! Commerce error types.

use crate::ids::PaymentId;
use std::fmt;
use thiserror::Error;

/// Errors raised by the cart, catalog and protocol plumbing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Amount the gateway cannot charge.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Unrecognized payment prompt answer.
    #[error("Unknown payment decision '{0}': expected success, failure or cancel")]
    UnknownDecision(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Invalid payment state transition.
    #[error("Invalid payment transition from {from} to {to}")]
    InvalidPaymentTransition { from: String, to: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

/// A required shipping form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// Required fields in form order.
    pub const REQUIRED: [ShippingField; 8] = [
        ShippingField::FirstName,
        ShippingField::LastName,
        ShippingField::Email,
        ShippingField::Phone,
        ShippingField::Address,
        ShippingField::City,
        ShippingField::State,
        ShippingField::ZipCode,
    ];

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ShippingField::FirstName => "first name",
            ShippingField::LastName => "last name",
            ShippingField::Email => "email",
            ShippingField::Phone => "phone",
            ShippingField::Address => "address",
            ShippingField::City => "city",
            ShippingField::State => "state",
            ShippingField::ZipCode => "zip code",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping form validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are blank.
    #[error("Please fill in: {}", join_fields(.0))]
    MissingFields(Vec<ShippingField>),

    /// Email is not `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Phone does not contain exactly ten digits.
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

fn join_fields(fields: &[ShippingField]) -> String {
    fields
        .iter()
        .map(ShippingField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a checkout attempt did not complete.
///
/// Every variant leaves the cart untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Payment system is not ready. Please wait a moment.")]
    GatewayNotReady,

    /// Another attempt is still in flight on this session.
    #[error("A payment is already being processed")]
    AttemptInProgress,

    #[error("Failed to create order: {0}")]
    OrderCreation(String),

    /// The gateway declined the payment.
    #[error("Payment failed ({code}): {reason}")]
    PaymentFailed { code: String, reason: String },

    /// The customer cancelled or dismissed the payment prompt.
    #[error("Payment was cancelled")]
    Cancelled,

    /// The gateway response did not pass verification.
    #[error("Payment verification failed for payment {payment_id}")]
    VerificationFailed { payment_id: PaymentId },

    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl CheckoutError {
    /// Message shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Validation(e) => e.to_string(),
            CheckoutError::EmptyCart | CheckoutError::GatewayNotReady => self.to_string(),
            CheckoutError::AttemptInProgress => {
                "Your payment is being processed. Please wait.".to_string()
            }
            CheckoutError::OrderCreation(_) => "Failed to create order. Please try again.".to_string(),
            CheckoutError::PaymentFailed { reason, .. } if !reason.is_empty() => reason.clone(),
            CheckoutError::PaymentFailed { .. } => {
                "Payment failed. Please try with a different payment method.".to_string()
            }
            CheckoutError::Cancelled => {
                "Payment was cancelled. You can try again anytime.".to_string()
            }
            CheckoutError::VerificationFailed { payment_id } => format!(
                "Payment verification failed. Please contact support with your payment ID: {}",
                payment_id
            ),
            CheckoutError::Commerce(_) => "Payment failed. Please try again.".to_string(),
        }
    }

    /// Whether the shopper may simply submit again.
    ///
    /// Verification failures need support follow-up with the payment id.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CheckoutError::VerificationFailed { .. })
    }
}
