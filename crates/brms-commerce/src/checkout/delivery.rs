//! Delivery method and details.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMethod {
    /// Courier delivery within the hour.
    #[serde(rename = "delivery_1hour")]
    Delivery1Hour,
    /// Served at a table.
    #[serde(rename = "dine_in")]
    DineIn,
    /// Collected at the counter.
    #[serde(rename = "take_away")]
    TakeAway,
}

impl DeliveryMethod {
    /// All methods, in display order.
    pub const ALL: [DeliveryMethod; 3] = [
        DeliveryMethod::Delivery1Hour,
        DeliveryMethod::DineIn,
        DeliveryMethod::TakeAway,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Delivery1Hour => "delivery_1hour",
            DeliveryMethod::DineIn => "dine_in",
            DeliveryMethod::TakeAway => "take_away",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Delivery1Hour => "Delivery (1 hour)",
            DeliveryMethod::DineIn => "Dine in",
            DeliveryMethod::TakeAway => "Take away",
        }
    }

    /// Whether the courier needs an address.
    pub fn requires_address(&self) -> bool {
        matches!(self, DeliveryMethod::Delivery1Hour)
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CommerceError::UnknownOption {
                kind: "delivery method",
                value: s.to_string(),
            })
    }
}

/// The delivery step's form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    /// Selected method.
    pub method: Option<DeliveryMethod>,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// District (e.g., "Gasabo").
    #[serde(default)]
    pub district: String,
    /// Landmark or sector the courier should look for.
    #[serde(default)]
    pub location: String,
    /// Table number for dine-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    /// Note for the courier or kitchen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DeliveryDetails {
    /// Start the form with a method selected.
    pub fn for_method(method: DeliveryMethod) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    /// Fill in the courier address.
    pub fn with_address(
        mut self,
        address: impl Into<String>,
        district: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.district = district.into();
        self.location = location.into();
        self
    }

    /// Required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.method {
            None => missing.push("delivery method"),
            Some(method) if method.requires_address() => {
                if self.address.trim().is_empty() {
                    missing.push("address");
                }
                if self.district.trim().is_empty() {
                    missing.push("district");
                }
                if self.location.trim().is_empty() {
                    missing.push("location");
                }
            }
            Some(_) => {}
        }
        missing
    }

    /// One-line description for summaries.
    pub fn describe(&self) -> String {
        match self.method {
            Some(DeliveryMethod::Delivery1Hour) => format!(
                "{} to {}, {} ({})",
                DeliveryMethod::Delivery1Hour.display_name(),
                self.address,
                self.district,
                self.location
            ),
            Some(DeliveryMethod::DineIn) => match &self.table_number {
                Some(table) => format!("Dine in, table {table}"),
                None => "Dine in".to_string(),
            },
            Some(DeliveryMethod::TakeAway) => "Take away".to_string(),
            None => "No delivery method".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_requires_address_fields() {
        let details = DeliveryDetails::for_method(DeliveryMethod::Delivery1Hour);
        assert_eq!(details.missing_fields(), vec!["address", "district", "location"]);

        let details = details.with_address("KG 11 Ave", "Gasabo", "  ");
        assert_eq!(details.missing_fields(), vec!["location"]);
    }

    #[test]
    fn test_dine_in_and_take_away_need_no_address() {
        for method in [DeliveryMethod::DineIn, DeliveryMethod::TakeAway] {
            assert!(DeliveryDetails::for_method(method).missing_fields().is_empty());
        }
    }

    #[test]
    fn test_method_is_required() {
        assert_eq!(
            DeliveryDetails::default().missing_fields(),
            vec!["delivery method"]
        );
    }

    #[test]
    fn test_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryMethod::Delivery1Hour).unwrap(),
            "\"delivery_1hour\""
        );
        assert_eq!("dine_in".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::DineIn);
        assert!("drone".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn test_describe() {
        let mut details = DeliveryDetails::for_method(DeliveryMethod::DineIn);
        details.table_number = Some("7".to_string());
        assert_eq!(details.describe(), "Dine in, table 7");
    }
}
