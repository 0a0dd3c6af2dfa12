//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart, pricing and checkout operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Menu item cannot currently be ordered.
    #[error("Item unavailable: {0}")]
    ItemUnavailable(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout cannot start or finish with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Required checkout fields are missing.
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Unknown delivery or payment option.
    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },

    /// The checkout already produced an order.
    #[error("Order already placed: {0}")]
    AlreadyPlaced(String),

    /// The order placer rejected the order.
    #[error("Order placement failed: {0}")]
    PlacementFailed(String),
}

impl CommerceError {
    /// Check if this is a form validation failure the user can fix.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::MissingFields(_)
                | CommerceError::EmptyCart
                | CommerceError::InvalidQuantity(_)
                | CommerceError::QuantityExceedsLimit(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = CommerceError::MissingFields(vec!["address", "district"]);
        assert_eq!(err.to_string(), "Please fill in: address, district");
        assert!(err.is_validation());
        assert!(!CommerceError::Overflow.is_validation());
    }
}
