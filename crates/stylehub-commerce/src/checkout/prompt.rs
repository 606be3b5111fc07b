//! The shopper-facing side of a payment attempt.
//!
//! Checkout suspends on a [`DecisionPrompt`] until the shopper picks an
//! outcome. The UI layer decides how the prompt is rendered.

use super::gateway::{PaymentDecision, PaymentRequest};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Asks the shopper how a payment attempt should resolve.
#[async_trait]
pub trait DecisionPrompt: Send + Sync {
    async fn decide(&self, request: &PaymentRequest) -> PaymentDecision;
}

/// Always answers with the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDecision(pub PaymentDecision);

#[async_trait]
impl DecisionPrompt for FixedDecision {
    async fn decide(&self, _request: &PaymentRequest) -> PaymentDecision {
        self.0
    }
}

/// A prompt waiting on the UI.
///
/// Dropping it without answering counts as dismissing the prompt.
#[derive(Debug)]
pub struct PendingDecision {
    pub request: PaymentRequest,
    responder: oneshot::Sender<PaymentDecision>,
}

impl PendingDecision {
    pub fn decide(self, decision: PaymentDecision) {
        // The attempt may already have timed out.
        let _ = self.responder.send(decision);
    }

    pub fn dismiss(self) {
        self.decide(PaymentDecision::Cancel);
    }
}

/// Forwards each prompt to a receiver owned by the UI.
#[derive(Debug, Clone)]
pub struct ChannelPrompt {
    requests: mpsc::Sender<PendingDecision>,
}

impl ChannelPrompt {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<PendingDecision>) {
        let (requests, receiver) = mpsc::channel(buffer);
        (Self { requests }, receiver)
    }
}

#[async_trait]
impl DecisionPrompt for ChannelPrompt {
    async fn decide(&self, request: &PaymentRequest) -> PaymentDecision {
        let (responder, answer) = oneshot::channel();
        let pending = PendingDecision {
            request: request.clone(),
            responder,
        };
        if self.requests.send(pending).await.is_err() {
            return PaymentDecision::Cancel;
        }
        answer.await.unwrap_or(PaymentDecision::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::OrderId;
    use crate::money::Money;

    fn request() -> PaymentRequest {
        PaymentRequest {
            order_id: OrderId::mock(),
            amount: Money::inr(408277),
            merchant_name: "StyleHub".into(),
            description: "Fashion Store Purchase".into(),
            customer_name: "Asha Rao".into(),
            customer_email: "asha@example.com".into(),
            customer_contact: "5551234567".into(),
        }
    }

    #[tokio::test]
    async fn test_fixed_decision() {
        let prompt = FixedDecision(PaymentDecision::SimulateFailure);
        assert_eq!(prompt.decide(&request()).await, PaymentDecision::SimulateFailure);
    }

    #[tokio::test]
    async fn test_channel_prompt_forwards_answer() {
        let (prompt, mut receiver) = ChannelPrompt::new(1);
        let ui = tokio::spawn(async move {
            let pending = receiver.recv().await.unwrap();
            assert_eq!(pending.request.merchant_name, "StyleHub");
            pending.decide(PaymentDecision::SimulateSuccess);
        });

        assert_eq!(prompt.decide(&request()).await, PaymentDecision::SimulateSuccess);
        ui.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_prompt_is_cancel() {
        let (prompt, mut receiver) = ChannelPrompt::new(1);
        let ui = tokio::spawn(async move {
            drop(receiver.recv().await);
        });

        assert_eq!(prompt.decide(&request()).await, PaymentDecision::Cancel);
        ui.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_ui_is_cancel() {
        let (prompt, receiver) = ChannelPrompt::new(1);
        drop(receiver);
        assert_eq!(prompt.decide(&request()).await, PaymentDecision::Cancel);
    }
}
