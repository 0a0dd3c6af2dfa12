//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of the currency. For the
//! Rwandan Franc that unit is the franc itself, so `Money::new(1000, RWF)`
//! is one thousand francs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis points in one whole (100%).
pub const BPS_SCALE: i64 = 10_000;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Rwandan Franc.
    #[default]
    RWF,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "RWF").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::RWF => "RWF",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the display prefix used when formatting amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RWF => "RWF\u{a0}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::RWF => 0,
            Currency::USD | Currency::EUR => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "RWF" => Some(Currency::RWF),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
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
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
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

    /// Create a Money value in Rwandan Francs.
    pub fn rwf(francs: i64) -> Self {
        Self::new(francs, Currency::RWF)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use brms_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_minor = (amount * multiplier as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Add another Money value. `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Subtract another Money value. `None` on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar. `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Apply a rate expressed in basis points, rounding half away from zero
    /// to the nearest minor unit.
    ///
    /// ```
    /// use brms_commerce::money::Money;
    /// assert_eq!(Money::rwf(2000).try_apply_rate_bps(800), Some(Money::rwf(160)));
    /// assert_eq!(Money::rwf(1).try_apply_rate_bps(5000), Some(Money::rwf(1)));
    /// ```
    pub fn try_apply_rate_bps(&self, rate_bps: u32) -> Option<Money> {
        let scaled = i128::from(self.amount_minor) * i128::from(rate_bps);
        let scale = i128::from(BPS_SCALE);
        let half = scale / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / scale
        } else {
            (scaled - half) / scale
        };
        i64::try_from(rounded)
            .ok()
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values. `None` on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format with currency prefix and thousands grouping (e.g., "RWF 5,160").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format the amount only, with thousands grouping (e.g., "5,160").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = self.amount_minor.unsigned_abs();
        let whole = group_thousands(magnitude / divisor);
        let sign = if self.is_negative() { "-" } else { "" };
        if places == 0 {
            format!("{sign}{whole}")
        } else {
            let fraction = magnitude % divisor;
            format!("{sign}{whole}.{fraction:0width$}", width = places as usize)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
