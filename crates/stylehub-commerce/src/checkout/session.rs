//! Checkout session: validation, totals and one payment attempt at a time.

use super::flow::PaymentState;
use super::gateway::{
    MockPaymentResult, PaymentDecision, PaymentGateway, PaymentRequest, USER_CANCELLED_CODE,
};
use super::prompt::DecisionPrompt;
use super::shipping::{validate_shipping, ShippingInfo};
use crate::cart::{compute_totals, CartStore, OrderTotals};
use crate::config::CommerceConfig;
use crate::error::{CheckoutError, CommerceError};
use crate::ids::{OrderId, PaymentId, SessionId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Receipt for a verified payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    /// Amount charged, in INR.
    pub amount_inr: Money,
    pub totals: OrderTotals,
    pub shipping_info: ShippingInfo,
}

/// Drives checkout for one shopper.
///
/// Only one payment attempt may be in flight; a second submission while one
/// is pending fails with [`CheckoutError::AttemptInProgress`].
#[derive(Debug)]
pub struct CheckoutSession<G> {
    id: SessionId,
    gateway: G,
    config: CommerceConfig,
    state: Mutex<PaymentState>,
}

impl<G: PaymentGateway> CheckoutSession<G> {
    pub fn new(gateway: G, config: CommerceConfig) -> Self {
        Self {
            id: SessionId::generate(),
            gateway,
            config,
            state: Mutex::new(PaymentState::Idle),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &CommerceConfig {
        &self.config
    }

    /// Current protocol state.
    pub fn state(&self) -> PaymentState {
        *self.lock_state()
    }

    /// Whether an attempt is between submission and its outcome.
    pub fn is_processing(&self) -> bool {
        self.state().is_processing()
    }

    /// Totals the shopper would pay for the cart as it stands.
    pub fn quote(&self, cart: &CartStore) -> Result<OrderTotals, CommerceError> {
        compute_totals(cart.total(), &self.config.pricing)
    }

    /// Run one checkout attempt.
    ///
    /// The cart is cleared only after the payment is verified. Every error
    /// leaves the cart and the shipping details as they were, and the session
    /// ready for another attempt.
    pub async fn submit_checkout<P>(
        &self,
        cart: &mut CartStore,
        shipping: &ShippingInfo,
        prompt: &P,
    ) -> Result<OrderConfirmation, CheckoutError>
    where
        P: DecisionPrompt + ?Sized,
    {
        if !self.state().can_start() {
            return Err(CheckoutError::AttemptInProgress);
        }
        validate_shipping(shipping)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if !self.gateway.is_ready() {
            return Err(CheckoutError::GatewayNotReady);
        }

        let totals = self.quote(cart)?;
        let attempt = self.begin_attempt()?;

        info!(
            session = %self.id,
            amount = %totals.final_total_inr,
            items = cart.item_count(),
            "creating order"
        );
        let order = self
            .gateway
            .create_order(totals.final_total_inr)
            .await
            .map_err(|e| {
                warn!(session = %self.id, error = %e, "order creation failed");
                CheckoutError::OrderCreation(e.to_string())
            })?;
        attempt.advance(PaymentState::AwaitingUserDecision)?;

        let request = PaymentRequest {
            order_id: order.order_id.clone(),
            amount: order.amount,
            merchant_name: self.config.store.merchant_name.clone(),
            description: self.config.store.purchase_description.clone(),
            customer_name: shipping.full_name(),
            customer_email: shipping.email.clone(),
            customer_contact: shipping.phone_digits(),
        };
        let decision = self.await_decision(prompt, &request).await;
        debug!(session = %self.id, order_id = %order.order_id, decision = decision.as_str(), "decision received");

        match self.gateway.authorize(&order, decision).await {
            MockPaymentResult::Success {
                payment_id,
                order_id,
                signature,
            } => {
                attempt.advance(PaymentState::Verifying)?;
                let verified = self
                    .gateway
                    .verify_payment(&payment_id, &order_id, &signature)
                    .await;

                if !verified {
                    attempt.advance(PaymentState::VerificationFailed)?;
                    warn!(session = %self.id, %order_id, %payment_id, "payment verification failed");
                    return Err(CheckoutError::VerificationFailed { payment_id });
                }

                attempt.advance(PaymentState::Verified)?;
                cart.clear();
                info!(session = %self.id, %order_id, %payment_id, amount = %order.amount, "payment verified");
                Ok(OrderConfirmation {
                    order_id,
                    payment_id,
                    amount_inr: order.amount,
                    totals,
                    shipping_info: shipping.clone(),
                })
            }
            MockPaymentResult::Failed { code, reason } => {
                attempt.advance(PaymentState::PaymentFailed)?;
                warn!(session = %self.id, order_id = %order.order_id, %code, %reason, "payment failed");
                Err(CheckoutError::PaymentFailed { code, reason })
            }
            MockPaymentResult::Cancelled => {
                attempt.advance(PaymentState::PaymentCancelled)?;
                warn!(session = %self.id, order_id = %order.order_id, code = USER_CANCELLED_CODE, "payment cancelled");
                Err(CheckoutError::Cancelled)
            }
        }
    }

    async fn await_decision<P>(&self, prompt: &P, request: &PaymentRequest) -> PaymentDecision
    where
        P: DecisionPrompt + ?Sized,
    {
        match self.config.gateway.decision_timeout() {
            Some(limit) => match tokio::time::timeout(limit, prompt.decide(request)).await {
                Ok(decision) => decision,
                Err(_) => {
                    debug!(session = %self.id, ?limit, "payment prompt timed out");
                    PaymentDecision::Cancel
                }
            },
            None => prompt.decide(request).await,
        }
    }

    fn begin_attempt(&self) -> Result<Attempt<'_>, CheckoutError> {
        let mut state = self.lock_state();
        if !state.can_start() {
            return Err(CheckoutError::AttemptInProgress);
        }
        if state.is_terminal() {
            state.transition(PaymentState::Idle)?;
        }
        state.transition(PaymentState::OrderCreating)?;
        Ok(Attempt { state: &self.state })
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, PaymentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the session's in-flight slot for one attempt.
///
/// Dropping an attempt that never reached an outcome releases the slot.
struct Attempt<'a> {
    state: &'a Mutex<PaymentState>,
}

impl Attempt<'_> {
    fn advance(&self, next: PaymentState) -> Result<PaymentState, CommerceError> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .transition(next)
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_processing() {
            *state = PaymentState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::gateway::MockGateway;
    use crate::checkout::prompt::FixedDecision;
    use crate::config::GatewayConfig;
    use crate::error::ValidationError;

    fn session() -> CheckoutSession<MockGateway> {
        CheckoutSession::new(MockGateway::default(), CommerceConfig::default())
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            phone: "555-123-4567".into(),
            address: "12 MG Road".into(),
            city: "Bengaluru".into(),
            state: "KA".into(),
            zip_code: "560001".into(),
            ..ShippingInfo::default()
        }
    }

    fn cart() -> CartStore {
        let mut cart = CartStore::new();
        let tee = Product::new("1", "Classic White Cotton T-Shirt", Money::usd(2999));
        cart.add_item(&tee, "M", "Black", 1).unwrap();
        cart
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_cart() {
        let session = session();
        tokio::time::advance(std::time::Duration::from_secs(1)).await;
        let mut cart = cart();

        let receipt = session
            .submit_checkout(&mut cart, &shipping(), &FixedDecision(PaymentDecision::SimulateSuccess))
            .await
            .unwrap();

        assert!(cart.is_empty());
        assert!(receipt.order_id.is_mock());
        assert!(receipt.payment_id.is_mock());
        // 29.99 + 5.99 + 2.3992 = 38.3792 USD
        assert_eq!(receipt.amount_inr, Money::inr(318547));
        assert_eq!(receipt.totals.final_total, Money::usd(3838));
        assert_eq!(session.state(), PaymentState::Verified);
        assert!(!session.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_ready_before_warmup() {
        let session = session();
        let mut cart = cart();
        let result = session
            .submit_checkout(&mut cart, &shipping(), &FixedDecision(PaymentDecision::SimulateSuccess))
            .await;
        assert_eq!(result, Err(CheckoutError::GatewayNotReady));
        assert_eq!(session.state(), PaymentState::Idle);
    }

    #[tokio::test]
    async fn test_validation_runs_first() {
        let session = CheckoutSession::new(
            MockGateway::new(GatewayConfig::instant()),
            CommerceConfig::default(),
        );
        let mut info = shipping();
        info.email = "not-an-email".into();
        let mut empty = CartStore::new();

        let result = session
            .submit_checkout(&mut empty, &info, &FixedDecision(PaymentDecision::SimulateSuccess))
            .await;
        assert_eq!(
            result,
            Err(CheckoutError::Validation(ValidationError::InvalidEmail))
        );

        let result = session
            .submit_checkout(&mut empty, &shipping(), &FixedDecision(PaymentDecision::SimulateSuccess))
            .await;
        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[tokio::test(start_paused = true)]
    async fn test_decision_timeout_cancels() {
        struct NeverAnswers;

        #[async_trait::async_trait]
        impl DecisionPrompt for NeverAnswers {
            async fn decide(&self, _request: &PaymentRequest) -> PaymentDecision {
                std::future::pending().await
            }
        }

        let mut gateway = GatewayConfig::instant();
        gateway.decision_timeout_ms = Some(30_000);
        let config = CommerceConfig {
            gateway: gateway.clone(),
            ..CommerceConfig::default()
        };
        let session = CheckoutSession::new(MockGateway::new(gateway), config);
        let mut cart = cart();

        let result = session.submit_checkout(&mut cart, &shipping(), &NeverAnswers).await;
        assert_eq!(result, Err(CheckoutError::Cancelled));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(session.state(), PaymentState::PaymentCancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_attempt_releases_session() {
        let session = CheckoutSession::new(
            MockGateway::new(GatewayConfig::default()),
            CommerceConfig::default(),
        );
        tokio::time::advance(std::time::Duration::from_secs(1)).await;
        let mut cart = cart();

        {
            let prompt = FixedDecision(PaymentDecision::SimulateSuccess);
            let ship = shipping();
            let attempt = session.submit_checkout(&mut cart, &ship, &prompt);
            // Gives up while the order is still being created.
            let abandoned =
                tokio::time::timeout(std::time::Duration::from_millis(100), attempt).await;
            assert!(abandoned.is_err());
        }

        assert_eq!(session.state(), PaymentState::Idle);
        assert_eq!(cart.item_count(), 1);
    }
}
