//! Storefront configuration.
//!
//! Defaults reproduce the storefront's fixed business rules: free shipping
//! from $50.00, a flat $5.99 otherwise, 8% tax, and 83 INR per USD.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shipping country when none is given.
pub const DEFAULT_COUNTRY: &str = "India";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommerceConfig {
    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl CommerceConfig {
    /// Parse from a JSON document.
    pub fn from_json(content: &str) -> Result<Self, CommerceError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let pricing = &self.pricing;
        if pricing.free_shipping_threshold_cents < 0 || pricing.flat_shipping_cents < 0 {
            return Err(CommerceError::Config(
                "shipping amounts must not be negative".to_string(),
            ));
        }
        if pricing.tax_rate_bps > 10_000 {
            return Err(CommerceError::Config(format!(
                "tax rate {} bps exceeds 100%",
                pricing.tax_rate_bps
            )));
        }
        if !(pricing.usd_to_inr_rate.is_finite() && pricing.usd_to_inr_rate > 0.0) {
            return Err(CommerceError::Config(
                "exchange rate must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Order-total rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Subtotal (USD cents) at or above which shipping is free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_cents: i64,

    /// Flat shipping below the threshold (USD cents).
    #[serde(default = "default_flat_shipping")]
    pub flat_shipping_cents: i64,

    /// Tax rate in basis points.
    #[serde(default = "default_tax_rate")]
    pub tax_rate_bps: u32,

    /// Fixed USD to INR exchange rate.
    #[serde(default = "default_exchange_rate")]
    pub usd_to_inr_rate: f64,
}

fn default_free_shipping_threshold() -> i64 {
    5_000
}

fn default_flat_shipping() -> i64 {
    599
}

fn default_tax_rate() -> u32 {
    800
}

fn default_exchange_rate() -> f64 {
    83.0
}

impl PricingConfig {
    pub fn free_shipping_threshold(&self) -> Money {
        Money::usd(self.free_shipping_threshold_cents)
    }

    pub fn flat_shipping(&self) -> Money {
        Money::usd(self.flat_shipping_cents)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold_cents: default_free_shipping_threshold(),
            flat_shipping_cents: default_flat_shipping(),
            tax_rate_bps: default_tax_rate(),
            usd_to_inr_rate: default_exchange_rate(),
        }
    }
}

/// Simulated gateway timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Time before the gateway reports ready.
    #[serde(default = "default_warmup")]
    pub warmup_ms: u64,

    #[serde(default = "default_order_delay")]
    pub order_delay_ms: u64,

    /// Delay before a success callback fires.
    #[serde(default = "default_callback_delay")]
    pub success_delay_ms: u64,

    /// Delay before a failure callback fires.
    #[serde(default = "default_callback_delay")]
    pub failure_delay_ms: u64,

    /// Delay before a cancellation callback fires.
    #[serde(default = "default_cancel_delay")]
    pub cancel_delay_ms: u64,

    #[serde(default = "default_verify_delay")]
    pub verify_delay_ms: u64,

    /// How long to wait for the shopper's decision. None waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_timeout_ms: Option<u64>,
}

fn default_warmup() -> u64 {
    1_000
}

fn default_order_delay() -> u64 {
    500
}

fn default_callback_delay() -> u64 {
    1_000
}

fn default_cancel_delay() -> u64 {
    500
}

fn default_verify_delay() -> u64 {
    1_000
}

impl GatewayConfig {
    /// All delays zeroed; useful for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            warmup_ms: 0,
            order_delay_ms: 0,
            success_delay_ms: 0,
            failure_delay_ms: 0,
            cancel_delay_ms: 0,
            verify_delay_ms: 0,
            decision_timeout_ms: None,
        }
    }

    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    pub fn order_delay(&self) -> Duration {
        Duration::from_millis(self.order_delay_ms)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn failure_delay(&self) -> Duration {
        Duration::from_millis(self.failure_delay_ms)
    }

    pub fn cancel_delay(&self) -> Duration {
        Duration::from_millis(self.cancel_delay_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    pub fn decision_timeout(&self) -> Option<Duration> {
        self.decision_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            warmup_ms: default_warmup(),
            order_delay_ms: default_order_delay(),
            success_delay_ms: default_callback_delay(),
            failure_delay_ms: default_callback_delay(),
            cancel_delay_ms: default_cancel_delay(),
            verify_delay_ms: default_verify_delay(),
            decision_timeout_ms: None,
        }
    }
}

/// Merchant details shown on the payment prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_merchant_name")]
    pub merchant_name: String,

    #[serde(default = "default_description")]
    pub purchase_description: String,

    /// Country used when the shopper leaves it blank.
    #[serde(default = "default_country")]
    pub default_country: String,
}

fn default_merchant_name() -> String {
    "StyleHub".to_string()
}

fn default_description() -> String {
    "Fashion Store Purchase".to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            merchant_name: default_merchant_name(),
            purchase_description: default_description(),
            default_country: default_country(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storefront_rules() {
        let config = CommerceConfig::default();
        assert_eq!(config.pricing.free_shipping_threshold(), Money::usd(5000));
        assert_eq!(config.pricing.flat_shipping(), Money::usd(599));
        assert_eq!(config.pricing.tax_rate_bps, 800);
        assert_eq!(config.pricing.usd_to_inr_rate, 83.0);
        assert_eq!(config.gateway.order_delay_ms, 500);
        assert_eq!(config.store.default_country, "India");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            CommerceConfig::from_json(r#"{"pricing": {"tax_rate_bps": 500}}"#).unwrap();
        assert_eq!(config.pricing.tax_rate_bps, 500);
        assert_eq!(config.pricing.flat_shipping_cents, 599);
        assert_eq!(config.gateway, GatewayConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        let mut config = CommerceConfig::default();
        config.pricing.usd_to_inr_rate = 0.0;
        assert!(matches!(config.validate(), Err(CommerceError::Config(_))));

        let mut config = CommerceConfig::default();
        config.pricing.tax_rate_bps = 20_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_decision_timeout_optional() {
        let mut gateway = GatewayConfig::instant();
        assert_eq!(gateway.decision_timeout(), None);
        gateway.decision_timeout_ms = Some(250);
        assert_eq!(gateway.decision_timeout(), Some(Duration::from_millis(250)));
    }
}
