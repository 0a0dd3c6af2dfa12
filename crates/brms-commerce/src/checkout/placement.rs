//! Order placement.
//!
//! Placing an order makes no network call; [`SimulatedPlacer`] waits a
//! fixed delay and acknowledges. A real submission backend plugs in behind
//! [`OrderPlacer`].

use crate::checkout::Order;
use crate::error::CommerceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay used by the simulated placer.
pub const DEFAULT_PLACEMENT_DELAY: Duration = Duration::from_secs(2);

/// Acknowledgement that an order was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReceipt {
    pub order_number: String,
    pub acknowledged_at: DateTime<Utc>,
}

/// Accepts finished orders.
#[async_trait]
pub trait OrderPlacer: Send + Sync {
    /// Submit an order. Implementations should treat
    /// `order.idempotency_key` as the deduplication key.
    async fn place(&self, order: &Order) -> Result<PlacementReceipt, CommerceError>;
}

/// Acknowledges every order after a fixed, non-cancellable delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPlacer {
    delay: Duration,
}

impl SimulatedPlacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Acknowledge immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEMENT_DELAY)
    }
}

#[async_trait]
impl OrderPlacer for SimulatedPlacer {
    async fn place(&self, order: &Order) -> Result<PlacementReceipt, CommerceError> {
        tracing::debug!(
            order_number = %order.order_number,
            delay_ms = self.delay.as_millis() as u64,
            "simulating order placement"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(PlacementReceipt {
            order_number: order.order_number.clone(),
            acknowledged_at: Utc::now(),
        })
    }
}
