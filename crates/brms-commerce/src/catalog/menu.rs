//! Menu item types.

use crate::cart::{CartItem, MAX_QUANTITY_PER_ITEM};
use crate::error::CommerceError;
use crate::ids::{BusinessId, CartLineId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A dish or drink listed by a business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Product identifier, shared by every cart line for this item.
    pub id: ProductId,
    /// Business that lists the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Menu section (e.g., "drinks", "grill").
    pub category: String,
    /// Whether the kitchen/bar currently serves it.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Create a new available menu item.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            business_id: None,
            name: name.into(),
            description: String::new(),
            price,
            image: None,
            category: category.into(),
            available: true,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the listing business.
    pub fn with_business(mut self, business_id: BusinessId) -> Self {
        self.business_id = Some(business_id);
        self
    }

    /// Build a fresh cart line for this item.
    ///
    /// The line gets its own synthetic id; `total_price` is computed from
    /// the quantity.
    pub fn to_cart_item(&self, quantity: i64) -> Result<CartItem, CommerceError> {
        if !self.available {
            return Err(CommerceError::ItemUnavailable(self.name.clone()));
        }
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        let total_price = self
            .price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartItem {
            id: CartLineId::generate(),
            product_id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity,
            total_price,
            image: self.image.clone(),
            category: self.category.clone(),
            modifiers: Vec::new(),
            special_instructions: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cart_item() {
        let item = MenuItem::new("prod-1", "Isombe", Money::rwf(2500), "mains")
            .with_description("Cassava leaves");
        let line = item.to_cart_item(3).unwrap();

        assert_eq!(line.product_id, ProductId::new("prod-1"));
        assert_eq!(line.total_price, Money::rwf(7500));
        assert_eq!(line.description, "Cassava leaves");
        assert_ne!(line.id.as_str(), line.product_id.as_str());
    }

    #[test]
    fn test_each_line_gets_own_id() {
        let item = MenuItem::new("prod-1", "Fanta", Money::rwf(800), "drinks");
        let a = item.to_cart_item(1).unwrap();
        let b = item.to_cart_item(1).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_unavailable_item() {
        let mut item = MenuItem::new("prod-2", "Tilapia", Money::rwf(6000), "mains");
        item.available = false;
        assert_eq!(
            item.to_cart_item(1),
            Err(CommerceError::ItemUnavailable("Tilapia".to_string()))
        );
    }

    #[test]
    fn test_invalid_quantity() {
        let item = MenuItem::new("prod-3", "Primus", Money::rwf(1200), "drinks");
        assert!(item.to_cart_item(0).is_err());
        assert!(item.to_cart_item(MAX_QUANTITY_PER_ITEM + 1).is_err());
    }
}
