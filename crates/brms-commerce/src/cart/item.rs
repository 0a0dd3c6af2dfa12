//! Cart line type.

use crate::error::CommerceError;
use crate::ids::{CartLineId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// One line in the cart.
///
/// `total_price` always equals `price * quantity`; every path that changes
/// `quantity` goes through [`CartItem::set_quantity`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Synthetic cart-line identifier.
    pub id: CartLineId,
    /// Product this line is for.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Line total (price * quantity).
    pub total_price: Money,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Menu section.
    pub category: String,
    /// Chosen modifiers (e.g., "no onions", "extra chili").
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Free-text note for the kitchen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartItem {
    /// Set the quantity and recompute the line total.
    ///
    /// On overflow the line is left untouched.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        let total_price = self
            .price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.quantity = quantity;
        self.total_price = total_price;
        Ok(())
    }

    /// Recompute `total_price` from the current quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.set_quantity(self.quantity)
    }

    /// Add a modifier.
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Attach a kitchen note.
    pub fn with_special_instructions(mut self, note: impl Into<String>) -> Self {
        self.special_instructions = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuItem;

    #[test]
    fn test_set_quantity_updates_total() {
        let mut line = MenuItem::new("prod-1", "Chips", Money::rwf(1500), "sides")
            .to_cart_item(1)
            .unwrap();
        line.set_quantity(4).unwrap();
        assert_eq!(line.quantity, 4);
        assert_eq!(line.total_price, Money::rwf(6000));
    }

    #[test]
    fn test_set_quantity_overflow_leaves_line() {
        let mut line = MenuItem::new("prod-1", "Chips", Money::rwf(i64::MAX), "sides")
            .to_cart_item(1)
            .unwrap();
        assert_eq!(line.set_quantity(2), Err(CommerceError::Overflow));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let line = MenuItem::new("prod-1", "Chips", Money::rwf(1500), "sides")
            .to_cart_item(2)
            .unwrap()
            .with_special_instructions("well done");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], "prod-1");
        assert_eq!(json["totalPrice"]["amount_minor"], 3000);
        assert_eq!(json["specialInstructions"], "well done");
    }
}
