//! Order pricing.
//!
//! This is the only place subtotal, tax and delivery fee are computed. The
//! cart sidebar, the checkout summary and the order record all go through
//! [`PricingConfig::quote`] so they cannot drift apart.

use crate::cart::CartItem;
use crate::checkout::DeliveryMethod;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default tax rate: 8%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Default fee for one-hour delivery, in francs.
pub const DEFAULT_DELIVERY_FEE: i64 = 3000;

/// Computed totals for a set of cart lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Delivery fee.
    pub delivery_fee: Money,
    /// subtotal + tax + delivery_fee.
    pub total: Money,
}

/// Delivery fee per delivery method, in minor units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryFees {
    #[serde(default = "default_delivery_fee")]
    pub delivery_1hour: i64,
    #[serde(default)]
    pub dine_in: i64,
    #[serde(default)]
    pub take_away: i64,
}

fn default_delivery_fee() -> i64 {
    DEFAULT_DELIVERY_FEE
}

impl Default for DeliveryFees {
    fn default() -> Self {
        Self {
            delivery_1hour: DEFAULT_DELIVERY_FEE,
            dine_in: 0,
            take_away: 0,
        }
    }
}

impl DeliveryFees {
    /// Fee for a method, in minor units.
    pub fn for_method(&self, method: DeliveryMethod) -> i64 {
        match method {
            DeliveryMethod::Delivery1Hour => self.delivery_1hour,
            DeliveryMethod::DineIn => self.dine_in,
            DeliveryMethod::TakeAway => self.take_away,
        }
    }
}

/// Pricing rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingConfig {
    /// Currency every price must be in.
    #[serde(default)]
    pub currency: Currency,
    /// Tax rate in basis points (800 = 8%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
    /// Delivery fee per method.
    #[serde(default)]
    pub delivery_fees: DeliveryFees,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::RWF,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            delivery_fees: DeliveryFees::default(),
        }
    }
}

impl PricingConfig {
    /// Delivery fee for a method.
    pub fn delivery_fee(&self, method: DeliveryMethod) -> Money {
        Money::new(self.delivery_fees.for_method(method), self.currency)
    }

    /// Price lines for a delivery method.
    pub fn quote(
        &self,
        items: &[CartItem],
        method: DeliveryMethod,
    ) -> Result<Totals, CommerceError> {
        self.calculate(items, self.delivery_fee(method))
    }

    /// Price lines with an explicit delivery fee.
    ///
    /// `subtotal = Σ total_price`, `tax = subtotal * rate` rounded half-up to
    /// the minor unit, `total = subtotal + tax + delivery_fee`.
    pub fn calculate(
        &self,
        items: &[CartItem],
        delivery_fee: Money,
    ) -> Result<Totals, CommerceError> {
        let mismatch = |got: Currency| CommerceError::CurrencyMismatch {
            expected: self.currency.code().to_string(),
            got: got.code().to_string(),
        };

        if delivery_fee.currency != self.currency {
            return Err(mismatch(delivery_fee.currency));
        }
        if let Some(line) = items.iter().find(|i| i.total_price.currency != self.currency) {
            return Err(mismatch(line.total_price.currency));
        }

        let subtotal = Money::try_sum(items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CommerceError::Overflow)?;
        let tax = subtotal
            .try_apply_rate_bps(self.tax_rate_bps)
            .ok_or(CommerceError::Overflow)?;
        let total = subtotal
            .try_add(&tax)
            .and_then(|t| t.try_add(&delivery_fee))
            .ok_or(CommerceError::Overflow)?;

        Ok(Totals {
            subtotal,
            tax,
            delivery_fee,
            total,
        })
    }
}

/// Price lines with the default rules (8% tax, RWF) and the given fee.
pub fn calculate_totals(items: &[CartItem], delivery_fee: Money) -> Result<Totals, CommerceError> {
    PricingConfig::default().calculate(items, delivery_fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuItem;

    fn line(product: &str, price: i64, quantity: i64) -> CartItem {
        MenuItem::new(product, product, Money::rwf(price), "test")
            .to_cart_item(quantity)
            .unwrap()
    }

    #[test]
    fn test_reference_example() {
        let items = vec![line("prod-1", 1000, 2)];
        assert_eq!(items[0].total_price, Money::rwf(2000));

        let totals = calculate_totals(&items, Money::rwf(3000)).unwrap();
        assert_eq!(totals.subtotal, Money::rwf(2000));
        assert_eq!(totals.tax, Money::rwf(160));
        assert_eq!(totals.delivery_fee, Money::rwf(3000));
        assert_eq!(totals.total, Money::rwf(5160));
    }

    #[test]
    fn test_subtotal_is_sum_of_lines() {
        let items = vec![line("a", 1200, 3), line("b", 450, 1), line("c", 99, 7)];
        let totals = calculate_totals(&items, Money::rwf(0)).unwrap();
        let expected: i64 = items.iter().map(|i| i.total_price.amount_minor).sum();
        assert_eq!(totals.subtotal.amount_minor, expected);
        assert_eq!(
            totals.total.amount_minor,
            totals.subtotal.amount_minor + totals.tax.amount_minor
        );
    }

    #[test]
    fn test_total_with_fee_and_rounding() {
        let items = vec![line("a", 500, 2), line("b", 31, 1)];
        let totals = calculate_totals(&items, Money::rwf(3000)).unwrap();

        assert_eq!(totals.subtotal, Money::rwf(1031));
        assert_eq!(totals.tax, Money::rwf(82));
        assert_eq!(totals.delivery_fee, Money::rwf(3000));
        assert_eq!(
            totals.total.amount_minor,
            totals.subtotal.amount_minor
                + totals.tax.amount_minor
                + totals.delivery_fee.amount_minor
        );
        assert_eq!(totals.total, Money::rwf(4113));
    }

    #[test]
    fn test_empty_cart() {
        let totals = calculate_totals(&[], Money::rwf(3000)).unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total, Money::rwf(3000));
    }

    #[test]
    fn test_quote_uses_method_fee() {
        let pricing = PricingConfig::default();
        let items = vec![line("prod-1", 1000, 2)];

        let delivered = pricing.quote(&items, DeliveryMethod::Delivery1Hour).unwrap();
        let dine_in = pricing.quote(&items, DeliveryMethod::DineIn).unwrap();
        let take_away = pricing.quote(&items, DeliveryMethod::TakeAway).unwrap();

        assert_eq!(delivered.total, Money::rwf(5160));
        assert_eq!(dine_in.total, Money::rwf(2160));
        assert_eq!(take_away.delivery_fee, Money::rwf(0));
    }

    #[test]
    fn test_custom_rate() {
        let pricing = PricingConfig {
            tax_rate_bps: 1800,
            ..PricingConfig::default()
        };
        let totals = pricing.calculate(&[line("a", 1000, 1)], Money::rwf(0)).unwrap();
        assert_eq!(totals.tax, Money::rwf(180));
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = MenuItem::new("a", "a", Money::new(500, Currency::USD), "test")
            .to_cart_item(1)
            .unwrap();
        let result = calculate_totals(&[usd], Money::rwf(0));
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: PricingConfig = serde_json::from_str(r#"{"tax_rate_bps": 1000}"#).unwrap();
        assert_eq!(config.currency, Currency::RWF);
        assert_eq!(config.delivery_fees.delivery_1hour, DEFAULT_DELIVERY_FEE);
        assert_eq!(config.tax_rate_bps, 1000);
    }
}
