//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a PaymentId where an OrderId is expected.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by every order id the mock gateway issues.
pub const MOCK_ORDER_PREFIX: &str = "mock_order_";
/// Prefix carried by every payment id the mock gateway issues.
pub const MOCK_PAYMENT_PREFIX: &str = "mock_pay_";
/// Prefix carried by every signature the mock gateway issues.
pub const MOCK_SIGNATURE_PREFIX: &str = "mock_sig_";

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(PaymentId);
define_id!(PaymentSignature);
define_id!(SessionId);

impl OrderId {
    /// Issue a mock-origin order id.
    pub fn mock() -> Self {
        Self(mock_token(MOCK_ORDER_PREFIX, 9))
    }

    /// Whether this id was issued by the mock gateway.
    pub fn is_mock(&self) -> bool {
        self.0.starts_with(MOCK_ORDER_PREFIX)
    }
}

impl PaymentId {
    /// Issue a mock-origin payment id.
    pub fn mock() -> Self {
        Self(mock_token(MOCK_PAYMENT_PREFIX, 9))
    }

    /// Whether this id was issued by the mock gateway.
    pub fn is_mock(&self) -> bool {
        self.0.starts_with(MOCK_PAYMENT_PREFIX)
    }
}

impl PaymentSignature {
    /// Issue a mock-origin signature.
    pub fn mock() -> Self {
        Self(mock_token(MOCK_SIGNATURE_PREFIX, 16))
    }

    /// Whether this signature was issued by the mock gateway.
    pub fn is_mock(&self) -> bool {
        self.0.starts_with(MOCK_SIGNATURE_PREFIX)
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `<prefix><unix millis>_<random base-36 suffix>`.
fn mock_token(prefix: &str, suffix_len: usize) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}{}_{}", prefix, millis, random_base36(suffix_len))
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Generate a unique ID from random bytes.
fn generate_id() -> String {
    let bytes: [u8; 12] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("1");
        assert_eq!(id.as_str(), "1");
    }

    #[test]
    fn test_id_generation() {
        let id1 = SessionId::generate();
        let id2 = SessionId::generate();
        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 24);
    }

    #[test]
    fn test_mock_tokens_carry_prefixes() {
        let order = OrderId::mock();
        let payment = PaymentId::mock();
        let signature = PaymentSignature::mock();

        assert!(order.as_str().starts_with("mock_order_"));
        assert!(payment.as_str().starts_with("mock_pay_"));
        assert!(signature.as_str().starts_with("mock_sig_"));
        assert!(order.is_mock() && payment.is_mock() && signature.is_mock());
    }

    #[test]
    fn test_mock_tokens_are_unique() {
        assert_ne!(OrderId::mock(), OrderId::mock());
        assert_ne!(PaymentId::mock(), PaymentId::mock());
    }

    #[test]
    fn test_foreign_tokens_are_not_mock() {
        assert!(!OrderId::new("order_123").is_mock());
        assert!(!PaymentSignature::new("sig").is_mock());
    }

    #[test]
    fn test_signature_suffix_length() {
        let signature = PaymentSignature::mock();
        let suffix = signature.as_str().rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 16);
    }
}
