//! Payment gateway contract and the simulated gateway.

use crate::config::GatewayConfig;
use crate::error::CommerceError;
use crate::ids::{OrderId, PaymentId, PaymentSignature};
use crate::money::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Error code reported for a declined payment.
pub const PAYMENT_FAILED_CODE: &str = "PAYMENT_FAILED";
/// Error code reported when the shopper backs out.
pub const USER_CANCELLED_CODE: &str = "USER_CANCELLED";

/// An order registered with the gateway for one payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockOrder {
    pub order_id: OrderId,
    /// Payable amount in minor units (paise).
    pub amount: Money,
}

/// What the payment prompt shows the shopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub amount: Money,
    pub merchant_name: String,
    pub description: String,
    pub customer_name: String,
    pub customer_email: String,
    /// Digits only.
    pub customer_contact: String,
}

/// The shopper's choice on the payment prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDecision {
    SimulateSuccess,
    SimulateFailure,
    /// Explicit cancel or dismissing the prompt.
    Cancel,
}

impl PaymentDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentDecision::SimulateSuccess => "success",
            PaymentDecision::SimulateFailure => "failure",
            PaymentDecision::Cancel => "cancel",
        }
    }
}

impl FromStr for PaymentDecision {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" | "simulate_success" => Ok(PaymentDecision::SimulateSuccess),
            "failure" | "fail" | "simulate_failure" => Ok(PaymentDecision::SimulateFailure),
            "cancel" | "dismiss" => Ok(PaymentDecision::Cancel),
            _ => Err(CommerceError::UnknownDecision(s.to_string())),
        }
    }
}

/// Exactly one of these is produced per payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MockPaymentResult {
    Success {
        payment_id: PaymentId,
        order_id: OrderId,
        signature: PaymentSignature,
    },
    Failed {
        code: String,
        reason: String,
    },
    Cancelled,
}

/// A payment provider as seen by checkout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Whether the gateway can accept payments yet.
    fn is_ready(&self) -> bool {
        true
    }

    /// Register an order for `amount`.
    async fn create_order(&self, amount: Money) -> Result<MockOrder, CommerceError>;

    /// Resolve the shopper's decision into a payment result.
    async fn authorize(&self, order: &MockOrder, decision: PaymentDecision) -> MockPaymentResult;

    /// Check a success response before the order is treated as paid.
    async fn verify_payment(
        &self,
        payment_id: &PaymentId,
        order_id: &OrderId,
        signature: &PaymentSignature,
    ) -> bool;
}

/// A gateway that never touches the network.
///
/// Every call completes after a fixed delay, and verification accepts only
/// tokens this gateway could have issued.
#[derive(Debug, Clone)]
pub struct MockGateway {
    config: GatewayConfig,
    ready_at: Instant,
}

impl MockGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let ready_at = Instant::now() + config.warmup();
        Self { config, ready_at }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    fn is_ready(&self) -> bool {
        Instant::now() >= self.ready_at
    }

    async fn create_order(&self, amount: Money) -> Result<MockOrder, CommerceError> {
        sleep(self.config.order_delay()).await;
        if !amount.is_positive() {
            return Err(CommerceError::InvalidAmount(amount.to_string()));
        }
        let order = MockOrder {
            order_id: OrderId::mock(),
            amount,
        };
        debug!(order_id = %order.order_id, amount = %order.amount, "mock order created");
        Ok(order)
    }

    async fn authorize(&self, order: &MockOrder, decision: PaymentDecision) -> MockPaymentResult {
        match decision {
            PaymentDecision::SimulateSuccess => {
                sleep(self.config.success_delay()).await;
                MockPaymentResult::Success {
                    payment_id: PaymentId::mock(),
                    order_id: order.order_id.clone(),
                    signature: PaymentSignature::mock(),
                }
            }
            PaymentDecision::SimulateFailure => {
                sleep(self.config.failure_delay()).await;
                MockPaymentResult::Failed {
                    code: PAYMENT_FAILED_CODE.to_string(),
                    reason: "Payment failed due to insufficient funds or card declined."
                        .to_string(),
                }
            }
            PaymentDecision::Cancel => {
                sleep(self.config.cancel_delay()).await;
                MockPaymentResult::Cancelled
            }
        }
    }

    async fn verify_payment(
        &self,
        payment_id: &PaymentId,
        order_id: &OrderId,
        signature: &PaymentSignature,
    ) -> bool {
        sleep(self.config.verify_delay()).await;
        payment_id.is_mock() && order_id.is_mock() && signature.is_mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn order() -> MockOrder {
        MockOrder {
            order_id: OrderId::mock(),
            amount: Money::inr(408277),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_order_echoes_amount() {
        let gateway = MockGateway::default();
        let started = Instant::now();
        let order = gateway.create_order(Money::inr(408277)).await.unwrap();

        assert_eq!(order.amount, Money::inr(408277));
        assert!(order.order_id.is_mock());
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_order_rejects_zero() {
        let gateway = MockGateway::default();
        let err = gateway.create_order(Money::inr(0)).await.unwrap_err();
        assert_eq!(err, CommerceError::InvalidAmount("\u{20b9}0.00".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_reuses_order_id() {
        let gateway = MockGateway::default();
        let order = order();
        let result = gateway.authorize(&order, PaymentDecision::SimulateSuccess).await;

        match result {
            MockPaymentResult::Success {
                payment_id,
                order_id,
                signature,
            } => {
                assert_eq!(order_id, order.order_id);
                assert!(gateway.verify_payment(&payment_id, &order_id, &signature).await);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_and_cancel() {
        let gateway = MockGateway::default();
        let order = order();

        let failed = gateway.authorize(&order, PaymentDecision::SimulateFailure).await;
        assert!(matches!(failed, MockPaymentResult::Failed { ref code, .. } if code == PAYMENT_FAILED_CODE));

        let cancelled = gateway.authorize(&order, PaymentDecision::Cancel).await;
        assert_eq!(cancelled, MockPaymentResult::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_rejects_foreign_tokens() {
        let gateway = MockGateway::default();
        let ok = gateway
            .verify_payment(
                &PaymentId::mock(),
                &OrderId::new("order_from_elsewhere"),
                &PaymentSignature::mock(),
            )
            .await;
        assert!(!ok);
    }

    #[tokio::test(start_paused = true)]
    async fn test_warmup() {
        let gateway = MockGateway::default();
        assert!(!gateway.is_ready());
        tokio::time::advance(Duration::from_millis(1_000)).await;
        assert!(gateway.is_ready());

        assert!(MockGateway::new(GatewayConfig::instant()).is_ready());
    }

    #[test]
    fn test_decision_parsing() {
        assert_eq!("Success".parse(), Ok(PaymentDecision::SimulateSuccess));
        assert_eq!("fail".parse(), Ok(PaymentDecision::SimulateFailure));
        assert_eq!("dismiss".parse(), Ok(PaymentDecision::Cancel));
        assert_eq!(
            "maybe".parse::<PaymentDecision>(),
            Err(CommerceError::UnknownDecision("maybe".to_string()))
        );
        for decision in [
            PaymentDecision::SimulateSuccess,
            PaymentDecision::SimulateFailure,
            PaymentDecision::Cancel,
        ] {
            assert_eq!(decision.as_str().parse(), Ok(decision));
        }
    }
}
