//! Billing contact.

use serde::{Deserialize, Serialize};

/// The billing step's form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDetails {
    /// Name on the order.
    #[serde(default)]
    pub full_name: String,
    /// Email for the receipt.
    #[serde(default)]
    pub email: String,
    /// Phone number the restaurant can call.
    #[serde(default)]
    pub phone: String,
}

impl BillingDetails {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Fill blank fields from another contact, keeping what was typed.
    pub fn fill_blanks_from(&mut self, other: &BillingDetails) {
        if self.full_name.trim().is_empty() {
            self.full_name = other.full_name.clone();
        }
        if self.email.trim().is_empty() {
            self.email = other.email.clone();
        }
        if self.phone.trim().is_empty() {
            self.phone = other.phone.clone();
        }
    }

    /// Required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_required() {
        assert_eq!(
            BillingDetails::default().missing_fields(),
            vec!["full name", "email", "phone"]
        );
        let complete = BillingDetails::new("Aline U.", "aline@example.rw", "+250788000000");
        assert!(complete.missing_fields().is_empty());
    }

    #[test]
    fn test_fill_blanks_keeps_typed_values() {
        let mut form = BillingDetails::new("", "typed@example.rw", "");
        form.fill_blanks_from(&BillingDetails::new("Eric", "session@example.rw", "0788"));
        assert_eq!(form.full_name, "Eric");
        assert_eq!(form.email, "typed@example.rw");
        assert_eq!(form.phone, "0788");
    }
}
