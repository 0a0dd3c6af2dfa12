//! Order types.

use crate::cart::CartItem;
use crate::checkout::{BillingDetails, DeliveryDetails, PaymentSummary};
use crate::ids::{OrderId, UserId};
use crate::pricing::Totals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Built, not yet acknowledged.
    #[default]
    Pending,
    /// Acknowledged by the placer.
    Confirmed,
    /// Kitchen/bar working on it.
    Preparing,
    /// Ready to serve or hand over.
    Ready,
    /// Served or delivered.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can still be cancelled (nothing cooked yet).
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// An order produced by a completed checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number shown on the confirmation.
    pub order_number: String,
    /// Key of the checkout that produced the order.
    pub idempotency_key: String,
    /// Logged-in customer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Billing contact.
    pub customer: BillingDetails,
    /// Cart lines at the time of checkout.
    pub items: Vec<CartItem>,
    /// Delivery method and address.
    pub delivery: DeliveryDetails,
    /// Payment method.
    pub payment: PaymentSummary,
    /// Prices at the time of checkout.
    pub totals: Totals,
    /// Order status.
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Generate a new order number: `BRMS-<unix millis>-<4 random chars>`.
    pub fn generate_order_number() -> String {
        use rand::distributions::Alphanumeric;
        use rand::Rng;

        let millis = Utc::now().timestamp_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(4)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        format!("BRMS-{millis}-{suffix}")
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Cancel the order. Returns `false` if it is too late.
    pub fn cancel(&mut self) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        let now = Utc::now();
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Update order status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Lines for a confirmation view.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Order {}", self.order_number),
            format!("Status: {}", self.status.display_name()),
            format!("Customer: {} <{}>", self.customer.full_name, self.customer.email),
            format!("Delivery: {}", self.delivery.describe()),
            format!("Payment: {}", self.payment),
        ];
        for item in &self.items {
            lines.push(format!(
                "{} x{} = {}",
                item.name,
                item.quantity,
                item.total_price.display()
            ));
        }
        lines.push(format!("Subtotal: {}", self.totals.subtotal.display()));
        lines.push(format!("Tax: {}", self.totals.tax.display()));
        lines.push(format!("Delivery fee: {}", self.totals.delivery_fee.display()));
        lines.push(format!("Total: {}", self.totals.total.display()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Confirmed.can_cancel());
        assert!(!OrderStatus::Preparing.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_number_format() {
        let number = Order::generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "BRMS");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
