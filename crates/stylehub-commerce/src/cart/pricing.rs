//! Order total calculations.

use crate::config::PricingConfig;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTotals {
    /// Cart total before shipping and tax.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax amount, rounded to the cent.
    pub tax: Money,
    /// subtotal + shipping + tax, for display.
    pub final_total: Money,
    /// Payable amount. Converted from the unrounded USD total, so it can
    /// differ from `final_total` converted after rounding.
    pub final_total_inr: Money,
    /// How much more reaches free shipping. `None` once it applies.
    pub amount_until_free_shipping: Option<Money>,
}

impl OrderTotals {
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Derive shipping, tax and the payable amount from a cart total.
///
/// Shipping is free at or above the threshold and flat below it; tax is a
/// flat rate on the subtotal.
pub fn compute_totals(
    cart_total: Money,
    pricing: &PricingConfig,
) -> Result<OrderTotals, CommerceError> {
    let shipping = if cart_total.amount_minor >= pricing.free_shipping_threshold_cents {
        Money::zero(cart_total.currency)
    } else {
        Money::new(pricing.flat_shipping_cents, cart_total.currency)
    };
    let tax = cart_total
        .percentage_bps(pricing.tax_rate_bps)
        .ok_or(CommerceError::Overflow)?;
    let final_total = cart_total
        .checked_add(&shipping)
        .and_then(|m| m.checked_add(&tax))
        .ok_or(CommerceError::Overflow)?;

    Ok(OrderTotals {
        subtotal: cart_total,
        shipping,
        tax,
        final_total,
        final_total_inr: payable_inr(cart_total, shipping, pricing)?,
        amount_until_free_shipping: amount_until_free_shipping(cart_total, pricing),
    })
}

/// `round((subtotal + shipping + subtotal * tax_rate) * usd_to_inr * 100)` paise,
/// with tax left unrounded.
fn payable_inr(
    subtotal: Money,
    shipping: Money,
    pricing: &PricingConfig,
) -> Result<Money, CommerceError> {
    // Ten-thousandths of a cent.
    let basis = (subtotal.amount_minor as i128)
        .checked_mul(10_000 + pricing.tax_rate_bps as i128)
        .and_then(|taxed| taxed.checked_add(shipping.amount_minor as i128 * 10_000))
        .ok_or(CommerceError::Overflow)?;
    let paise = (basis as f64 * pricing.usd_to_inr_rate / 10_000.0).round();
    if !paise.is_finite() || paise.abs() >= i64::MAX as f64 {
        return Err(CommerceError::Overflow);
    }
    Ok(Money::inr(paise as i64))
}

/// Remaining spend before shipping becomes free.
pub fn amount_until_free_shipping(subtotal: Money, pricing: &PricingConfig) -> Option<Money> {
    pricing
        .free_shipping_threshold()
        .checked_sub(&subtotal)
        .filter(Money::is_positive)
}

/// Convert at the configured fixed rate: `round(usd * rate * 100) / 100`.
pub fn convert_usd_to_inr(usd: Money, pricing: &PricingConfig) -> Money {
    usd.convert(pricing.usd_to_inr_rate, Currency::INR)
}
