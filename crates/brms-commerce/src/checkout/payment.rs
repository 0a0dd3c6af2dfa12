//! Payment selection.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// MTN MoMo / Airtel Money.
    MobileMoney,
    /// Debit or credit card.
    Card,
    /// Cash on delivery or at the counter.
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::MobileMoney,
        PaymentMethod::Card,
        PaymentMethod::Cash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "Mobile Money",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CommerceError::UnknownOption {
                kind: "payment method",
                value: s.to_string(),
            })
    }
}

/// The payment step's form.
///
/// Card fields never leave this struct; the order keeps a
/// [`PaymentSummary`] instead.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub mobile_money_phone: String,
    #[serde(default)]
    pub card_holder: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub card_expiry: String,
    #[serde(default)]
    pub card_cvv: String,
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("method", &self.method)
            .field("mobile_money_phone", &self.mobile_money_phone)
            .field("card_holder", &self.card_holder)
            .field("card_number", &mask_card(&self.card_number))
            .finish_non_exhaustive()
    }
}

impl PaymentDetails {
    pub fn mobile_money(phone: impl Into<String>) -> Self {
        Self {
            method: Some(PaymentMethod::MobileMoney),
            mobile_money_phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn card(
        holder: impl Into<String>,
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            method: Some(PaymentMethod::Card),
            card_holder: holder.into(),
            card_number: number.into(),
            card_expiry: expiry.into(),
            card_cvv: cvv.into(),
            ..Self::default()
        }
    }

    pub fn cash() -> Self {
        Self {
            method: Some(PaymentMethod::Cash),
            ..Self::default()
        }
    }

    /// Required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.method {
            None => missing.push("payment method"),
            Some(PaymentMethod::MobileMoney) => {
                if self.mobile_money_phone.trim().is_empty() {
                    missing.push("mobile money number");
                }
            }
            Some(PaymentMethod::Card) => {
                if self.card_holder.trim().is_empty() {
                    missing.push("card holder");
                }
                if self.card_number.trim().is_empty() {
                    missing.push("card number");
                }
                if self.card_expiry.trim().is_empty() {
                    missing.push("card expiry");
                }
                if self.card_cvv.trim().is_empty() {
                    missing.push("card cvv");
                }
            }
            Some(PaymentMethod::Cash) => {}
        }
        missing
    }

    /// What the order keeps about the payment.
    pub fn summary(&self) -> Option<PaymentSummary> {
        let method = self.method?;
        let reference = match method {
            PaymentMethod::MobileMoney => Some(self.mobile_money_phone.trim().to_string()),
            PaymentMethod::Card => Some(mask_card(&self.card_number)),
            PaymentMethod::Cash => None,
        };
        Some(PaymentSummary { method, reference })
    }
}

/// Payment as recorded on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub method: PaymentMethod,
    /// Phone number for mobile money, masked card number for cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl fmt::Display for PaymentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Some(reference) => write!(f, "{} ({})", self.method.display_name(), reference),
            None => f.write_str(self.method.display_name()),
        }
    }
}

fn mask_card(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("**** {last4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_money_needs_phone() {
        assert_eq!(
            PaymentDetails::mobile_money("").missing_fields(),
            vec!["mobile money number"]
        );
        assert!(PaymentDetails::mobile_money("0788123456")
            .missing_fields()
            .is_empty());
    }

    #[test]
    fn test_card_needs_all_fields() {
        let details = PaymentDetails::card("Jean", "4111 1111 1111 1111", "", "");
        assert_eq!(details.missing_fields(), vec!["card expiry", "card cvv"]);
    }

    #[test]
    fn test_cash_needs_nothing() {
        assert!(PaymentDetails::cash().missing_fields().is_empty());
        assert_eq!(
            PaymentDetails::default().missing_fields(),
            vec!["payment method"]
        );
    }

    #[test]
    fn test_summary_masks_card() {
        let details = PaymentDetails::card("Jean", "4111 1111 1111 1234", "12/29", "123");
        let summary = details.summary().unwrap();
        assert_eq!(summary.reference.as_deref(), Some("**** 1234"));
        assert!(!format!("{details:?}").contains("4111"));
        assert!(!format!("{details:?}").contains("123\""));
    }

    #[test]
    fn test_parse() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
