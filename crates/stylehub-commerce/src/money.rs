//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation (cents, paise) so that cart
//! totals never accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
///
/// Catalog prices are always USD; payments are taken in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    INR,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::INR => "INR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::INR => "\u{20b9}",
        }
    }

    /// Number of minor units in one major unit.
    pub fn minor_units(&self) -> i64 {
        100
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "INR" => Some(Currency::INR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a USD amount from cents.
    pub fn usd(cents: i64) -> Self {
        Self::new(cents, Currency::USD)
    }

    /// Create an INR amount from paise.
    pub fn inr(paise: i64) -> Self {
        Self::new(paise, Currency::INR)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use stylehub_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(29.99, Currency::USD);
    /// assert_eq!(price.amount_minor, 2999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_units() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_units() as f64
    }

    /// Format as a display string (e.g., "$49.19").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "49.19").
    pub fn display_amount(&self) -> String {
        let units = self.currency.minor_units();
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        format!(
            "{}{}.{:02}",
            sign,
            abs / units as u64,
            abs % units as u64
        )
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Subtract another Money value, returning None on currency mismatch or overflow.
    pub fn checked_sub(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Take a rate expressed in basis points (1/100 of a percent), rounding
    /// half away from zero to the minor unit. Returns None if the result does
    /// not fit.
    ///
    /// ```
    /// use stylehub_commerce::money::Money;
    /// // 8% of $40.00
    /// assert_eq!(Money::usd(4000).percentage_bps(800).unwrap().amount_minor, 320);
    /// ```
    pub fn percentage_bps(&self, bps: u32) -> Option<Money> {
        let scaled = self.amount_minor as i128 * bps as i128;
        let half = if scaled < 0 { -5_000 } else { 5_000 };
        let amount = i64::try_from((scaled + half) / 10_000).ok()?;
        Some(Money::new(amount, self.currency))
    }

    /// Convert into another currency at a fixed rate (target major units per
    /// source major unit), rounding to the nearest target minor unit.
    pub fn convert(&self, rate: f64, target: Currency) -> Money {
        let major = self.to_decimal() * rate;
        Money::from_decimal(major, target)
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn checked_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
