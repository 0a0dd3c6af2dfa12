//! Cart state and reducer.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::CartLineId;
use serde::{Deserialize, Serialize};

/// Actions accepted by the cart reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add a line, coalescing with an existing line for the same product.
    AddItem(CartItem),
    /// Remove the line with this id.
    RemoveItem(CartLineId),
    /// Set a line's quantity.
    UpdateQuantity { id: CartLineId, quantity: i64 },
    /// Remove every line.
    ClearCart,
    /// Flip sidebar visibility.
    ToggleCart,
    /// Hide the sidebar.
    CloseCart,
    /// Replace the whole list.
    SetCart(Vec<CartItem>),
}

impl CartAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "ADD_ITEM",
            CartAction::RemoveItem(_) => "REMOVE_ITEM",
            CartAction::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            CartAction::ClearCart => "CLEAR_CART",
            CartAction::ToggleCart => "TOGGLE_CART",
            CartAction::CloseCart => "CLOSE_CART",
            CartAction::SetCart(_) => "SET_CART",
        }
    }
}

/// The cart: its lines and whether the sidebar is open.
///
/// Never persisted; a new state starts empty and closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Lines in insertion order, at most one per product.
    pub items: Vec<CartItem>,
    /// Sidebar visibility.
    pub is_open: bool,
}

impl CartState {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action.
    ///
    /// Quantities are taken as given; routing `quantity <= 0` to removal is
    /// the store's job. If the action fails the state is unchanged.
    pub fn apply(&mut self, action: CartAction) -> Result<(), CommerceError> {
        self.log_dispatch(&action);

        match action {
            CartAction::AddItem(item) => {
                match self
                    .items
                    .iter_mut()
                    .find(|line| line.product_id == item.product_id)
                {
                    Some(existing) => {
                        let quantity = existing
                            .quantity
                            .checked_add(item.quantity)
                            .ok_or(CommerceError::Overflow)?;
                        existing.set_quantity(quantity)?;
                    }
                    None => {
                        let mut item = item;
                        item.update_total()?;
                        self.items.push(item);
                    }
                }
            }
            CartAction::RemoveItem(id) => {
                self.items.retain(|line| line.id != id);
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
                    line.set_quantity(quantity)?;
                }
            }
            CartAction::ClearCart => self.items.clear(),
            CartAction::ToggleCart => self.is_open = !self.is_open,
            CartAction::CloseCart => self.is_open = false,
            CartAction::SetCart(items) => {
                self.items = coalesce_lines(items)?;
            }
        }

        Ok(())
    }

    /// Remove every line. Visibility is kept.
    pub fn clear(&mut self) {
        self.log_dispatch(&CartAction::ClearCart);
        self.items.clear();
    }

    /// Flip sidebar visibility.
    pub fn toggle(&mut self) {
        self.log_dispatch(&CartAction::ToggleCart);
        self.is_open = !self.is_open;
    }

    /// Hide the sidebar.
    pub fn close(&mut self) {
        self.log_dispatch(&CartAction::CloseCart);
        self.is_open = false;
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by its cart-line id.
    pub fn get(&self, id: &CartLineId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    fn log_dispatch(&self, action: &CartAction) {
        tracing::debug!(action = action.as_str(), lines = self.items.len(), "cart dispatch");
    }
}

/// Merge lines for the same product into the first one, in order, and
/// recompute every line total.
pub(crate) fn coalesce_lines(items: Vec<CartItem>) -> Result<Vec<CartItem>, CommerceError> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for mut item in items {
        match merged
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            Some(existing) => {
                let quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(CommerceError::Overflow)?;
                existing.set_quantity(quantity)?;
            }
            None => {
                item.update_total()?;
                merged.push(item);
            }
        }
    }
    Ok(merged)
}
