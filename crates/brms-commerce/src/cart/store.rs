//! Cart store: the reducer plus validation and notifications.

use crate::cart::state::coalesce_lines;
use crate::cart::{CartAction, CartItem, CartState, Notifier, Toast, MAX_QUANTITY_PER_ITEM};
use crate::checkout::DeliveryMethod;
use crate::error::CommerceError;
use crate::ids::CartLineId;
use crate::pricing::{PricingConfig, Totals};

/// Owns the cart state and is the only way the UI mutates it.
///
/// Every mutating helper (`add_item`, `remove_item`, `update_quantity`,
/// `clear_cart`) emits a toast describing what happened. Repeated calls are
/// not debounced.
#[derive(Debug)]
pub struct CartStore<N: Notifier> {
    state: CartState,
    notifier: N,
}

impl<N: Notifier> CartStore<N> {
    /// Create an empty store.
    pub fn new(notifier: N) -> Self {
        Self {
            state: CartState::new(),
            notifier,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Current lines.
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    /// Whether the sidebar is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// The notifier toasts go to.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Apply an action without validation or notification.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CommerceError> {
        self.state.apply(action)
    }

    /// Add an item, merging into the existing line for the same product.
    ///
    /// Returns the id of the line that now holds the item.
    pub fn add_item(&mut self, item: CartItem) -> Result<CartLineId, CommerceError> {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }

        let existing = self
            .state
            .items
            .iter()
            .find(|line| line.product_id == item.product_id);
        let combined = match existing {
            Some(line) => line
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?,
            None => item.quantity,
        };
        if combined > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                combined,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        let line_id = existing
            .map(|line| line.id.clone())
            .unwrap_or_else(|| item.id.clone());

        let name = item.name.clone();
        self.state.apply(CartAction::AddItem(item))?;
        self.notifier
            .notify(Toast::success(format!("{name} added to cart")));
        Ok(line_id)
    }

    /// Remove a line. Returns `false` if no line had that id.
    pub fn remove_item(&mut self, id: &CartLineId) -> Result<bool, CommerceError> {
        let Some(name) = self.state.get(id).map(|line| line.name.clone()) else {
            return Ok(false);
        };
        self.state.apply(CartAction::RemoveItem(id.clone()))?;
        self.notifier
            .notify(Toast::info(format!("{name} removed from cart")));
        Ok(true)
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    ///
    /// Returns `false` if no line had that id.
    pub fn update_quantity(
        &mut self,
        id: &CartLineId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        let Some(name) = self.state.get(id).map(|line| line.name.clone()) else {
            return Ok(false);
        };
        self.state.apply(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        })?;
        self.notifier
            .notify(Toast::info(format!("{name} quantity set to {quantity}")));
        Ok(true)
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.state.clear();
        self.notifier.notify(Toast::info("Cart cleared"));
    }

    /// Flip sidebar visibility.
    pub fn toggle_cart(&mut self) {
        self.state.toggle();
    }

    /// Hide the sidebar.
    pub fn close_cart(&mut self) {
        self.state.close();
    }

    /// Replace every line, e.g. when syncing from elsewhere.
    ///
    /// Lines for the same product are merged. Each given quantity must be
    /// positive and each merged one at most [`MAX_QUANTITY_PER_ITEM`];
    /// otherwise the cart is left as it was.
    pub fn set_cart(&mut self, items: Vec<CartItem>) -> Result<(), CommerceError> {
        if let Some(line) = items.iter().find(|line| line.quantity <= 0) {
            return Err(CommerceError::InvalidQuantity(line.quantity));
        }
        let merged = coalesce_lines(items)?;
        if let Some(line) = merged
            .iter()
            .find(|line| line.quantity > MAX_QUANTITY_PER_ITEM)
        {
            return Err(CommerceError::QuantityExceedsLimit(
                line.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        self.state.apply(CartAction::SetCart(merged))
    }

    /// Price the cart for a delivery method.
    pub fn totals(
        &self,
        pricing: &PricingConfig,
        method: DeliveryMethod,
    ) -> Result<Totals, CommerceError> {
        pricing.quote(&self.state.items, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{ToastKind, ToastQueue};
    use crate::catalog::MenuItem;
    use crate::money::Money;
    use std::sync::Arc;

    fn store() -> (CartStore<Arc<ToastQueue>>, Arc<ToastQueue>) {
        let queue = Arc::new(ToastQueue::new());
        (CartStore::new(Arc::clone(&queue)), queue)
    }

    fn item(product: &str, name: &str, price: i64, quantity: i64) -> CartItem {
        MenuItem::new(product, name, Money::rwf(price), "test")
            .to_cart_item(quantity)
            .unwrap()
    }

    #[test]
    fn test_add_item_notifies() {
        let (mut cart, toasts) = store();
        cart.add_item(item("prod-1", "Brochette", 1000, 2)).unwrap();

        let toasts = toasts.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "Brochette added to cart");
    }

    #[test]
    fn test_add_same_product_returns_existing_line() {
        let (mut cart, _) = store();
        let first = cart.add_item(item("prod-1", "Brochette", 1000, 1)).unwrap();
        let second = cart.add_item(item("prod-1", "Brochette", 1000, 2)).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[0].total_price, Money::rwf(3000));
    }

    #[test]
    fn test_add_rejects_bad_quantities() {
        let (mut cart, toasts) = store();
        let mut zero = item("prod-1", "Brochette", 1000, 1);
        zero.quantity = 0;
        assert_eq!(cart.add_item(zero), Err(CommerceError::InvalidQuantity(0)));

        cart.add_item(item("prod-1", "Brochette", 1000, 60)).unwrap();
        let result = cart.add_item(item("prod-1", "Brochette", 1000, 40));
        assert_eq!(
            result,
            Err(CommerceError::QuantityExceedsLimit(100, MAX_QUANTITY_PER_ITEM))
        );
        assert_eq!(cart.items()[0].quantity, 60);
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let (mut cart, toasts) = store();
        let id = cart.add_item(item("prod-1", "Fanta", 800, 2)).unwrap();
        toasts.drain();

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
        assert_eq!(toasts.drain()[0].message, "Fanta removed from cart");
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let (mut cart, _) = store();
        let id = cart.add_item(item("prod-1", "Fanta", 800, 2)).unwrap();
        assert!(cart.update_quantity(&id, -3).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_recomputes_total() {
        let (mut cart, _) = store();
        let id = cart.add_item(item("prod-1", "Fanta", 800, 2)).unwrap();
        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.items()[0].total_price, Money::rwf(4000));
    }

    #[test]
    fn test_update_quantity_over_limit_keeps_line() {
        let (mut cart, toasts) = store();
        let id = cart.add_item(item("prod-1", "Fanta", 800, 2)).unwrap();
        toasts.drain();

        let result = cart.update_quantity(&id, MAX_QUANTITY_PER_ITEM + 1);
        assert_eq!(
            result,
            Err(CommerceError::QuantityExceedsLimit(
                MAX_QUANTITY_PER_ITEM + 1,
                MAX_QUANTITY_PER_ITEM
            ))
        );
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].total_price, Money::rwf(1600));
        assert!(toasts.is_empty());

        assert!(cart.update_quantity(&id, MAX_QUANTITY_PER_ITEM).unwrap());
        assert_eq!(cart.items()[0].quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_set_cart_merges_duplicate_products() {
        let (mut cart, toasts) = store();
        cart.set_cart(vec![
            item("prod-1", "Fanta", 800, 1),
            item("prod-2", "Chips", 1500, 1),
            item("prod-1", "Fanta", 800, 2),
        ])
        .unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[0].total_price, Money::rwf(2400));
        assert_eq!(cart.item_count(), 4);
        assert!(toasts.is_empty());

        let id = cart.add_item(item("prod-1", "Fanta", 800, 1)).unwrap();
        assert_eq!(id, cart.items()[0].id);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_set_cart_rejects_bad_quantities() {
        let (mut cart, _) = store();
        cart.add_item(item("prod-9", "Tea", 500, 1)).unwrap();
        let before = cart.state().clone();

        for bad in [0, -4] {
            let mut line = item("prod-3", "Tea", 500, 1);
            line.quantity = bad;
            let result = cart.set_cart(vec![item("prod-1", "Fanta", 800, 1), line]);
            assert_eq!(result, Err(CommerceError::InvalidQuantity(bad)));
            assert_eq!(cart.state(), &before);
        }

        let mut chips = item("prod-2", "Chips", 1500, 1);
        chips.quantity = 500;
        assert_eq!(
            cart.set_cart(vec![chips]),
            Err(CommerceError::QuantityExceedsLimit(500, MAX_QUANTITY_PER_ITEM))
        );
        assert_eq!(cart.state(), &before);
    }

    #[test]
    fn test_set_cart_limit_applies_after_merge() {
        let (mut cart, _) = store();
        let result = cart.set_cart(vec![
            item("prod-1", "Fanta", 800, 60),
            item("prod-1", "Fanta", 800, 40),
        ]);
        assert_eq!(
            result,
            Err(CommerceError::QuantityExceedsLimit(100, MAX_QUANTITY_PER_ITEM))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_line() {
        let (mut cart, toasts) = store();
        let missing = CartLineId::new("line_missing");
        assert!(!cart.remove_item(&missing).unwrap());
        assert!(!cart.update_quantity(&missing, 2).unwrap());
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_clear_cart_always_empties() {
        let (mut cart, toasts) = store();
        cart.clear_cart();
        assert!(cart.is_empty());

        cart.add_item(item("prod-1", "Fanta", 800, 2)).unwrap();
        cart.add_item(item("prod-2", "Chips", 1500, 1)).unwrap();
        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(toasts.drain().last().unwrap().message, "Cart cleared");
    }

    #[test]
    fn test_visibility_does_not_notify() {
        let (mut cart, toasts) = store();
        cart.toggle_cart();
        assert!(cart.is_open());
        cart.close_cart();
        assert!(!cart.is_open());
        assert!(toasts.is_empty());
    }
}
