//! Payment attempt state machine.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// States of a single payment attempt.
///
/// ```text
/// Idle -> OrderCreating -> AwaitingUserDecision -> Verifying -> Verified
///                                   |                  \-> VerificationFailed
///                                   |-> PaymentFailed
///                                   \-> PaymentCancelled
/// ```
///
/// Every terminal state may return to `Idle` for a fresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentState {
    #[default]
    Idle,
    OrderCreating,
    AwaitingUserDecision,
    Verifying,
    Verified,
    VerificationFailed,
    PaymentFailed,
    PaymentCancelled,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Idle => "idle",
            PaymentState::OrderCreating => "order_creating",
            PaymentState::AwaitingUserDecision => "awaiting_user_decision",
            PaymentState::Verifying => "verifying",
            PaymentState::Verified => "verified",
            PaymentState::VerificationFailed => "verification_failed",
            PaymentState::PaymentFailed => "payment_failed",
            PaymentState::PaymentCancelled => "payment_cancelled",
        }
    }

    /// Whether the attempt has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentState::Verified
                | PaymentState::VerificationFailed
                | PaymentState::PaymentFailed
                | PaymentState::PaymentCancelled
        )
    }

    /// Whether an attempt is between submission and its outcome.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            PaymentState::OrderCreating
                | PaymentState::AwaitingUserDecision
                | PaymentState::Verifying
        )
    }

    /// Whether a new attempt may start from here.
    pub fn can_start(&self) -> bool {
        *self == PaymentState::Idle || self.is_terminal()
    }

    /// Check whether `next` directly follows this state.
    pub fn can_transition_to(&self, next: PaymentState) -> bool {
        use PaymentState::*;
        match (self, next) {
            (Idle, OrderCreating) => true,
            (OrderCreating, AwaitingUserDecision) => true,
            (AwaitingUserDecision, Verifying | PaymentFailed | PaymentCancelled) => true,
            (Verifying, Verified | VerificationFailed) => true,
            (from, Idle) => from.is_terminal(),
            _ => false,
        }
    }

    /// Move to `next`, rejecting transitions the protocol does not allow.
    pub fn transition(&mut self, next: PaymentState) -> Result<PaymentState, CommerceError> {
        if !self.can_transition_to(next) {
            return Err(CommerceError::InvalidPaymentTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        *self = next;
        Ok(next)
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut state = PaymentState::Idle;
        for next in [
            PaymentState::OrderCreating,
            PaymentState::AwaitingUserDecision,
            PaymentState::Verifying,
            PaymentState::Verified,
        ] {
            assert_eq!(state.transition(next), Ok(next));
        }
        assert!(state.is_terminal());
        assert!(state.can_start());
    }

    #[test]
    fn test_decision_outcomes() {
        for outcome in [PaymentState::PaymentFailed, PaymentState::PaymentCancelled] {
            let mut state = PaymentState::AwaitingUserDecision;
            assert!(state.transition(outcome).is_ok());
            assert!(state.transition(PaymentState::Idle).is_ok());
        }
    }

    #[test]
    fn test_rejects_skipping_steps() {
        let mut state = PaymentState::Idle;
        let err = state.transition(PaymentState::Verifying).unwrap_err();
        assert_eq!(
            err,
            CommerceError::InvalidPaymentTransition {
                from: "idle".to_string(),
                to: "verifying".to_string(),
            }
        );
        assert_eq!(state, PaymentState::Idle);
    }

    #[test]
    fn test_no_cancel_once_verifying() {
        let state = PaymentState::Verifying;
        assert!(!state.can_transition_to(PaymentState::PaymentCancelled));
        assert!(!state.can_transition_to(PaymentState::Idle));
        assert!(state.is_processing());
        assert!(!state.can_start());
    }

    #[test]
    fn test_cannot_restart_mid_attempt() {
        assert!(!PaymentState::OrderCreating.can_transition_to(PaymentState::OrderCreating));
        assert!(!PaymentState::AwaitingUserDecision.can_start());
    }
}
