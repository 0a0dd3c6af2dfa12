//! Checkout module.
//!
//! The four-step wizard (cart, delivery, billing, payment), the forms each
//! step collects, and the order it produces.

mod billing;
mod delivery;
mod flow;
mod order;
mod payment;
mod placement;

pub use billing::BillingDetails;
pub use delivery::{DeliveryDetails, DeliveryMethod};
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::{Order, OrderStatus};
pub use payment::{PaymentDetails, PaymentMethod, PaymentSummary};
pub use placement::{OrderPlacer, PlacementReceipt, SimulatedPlacer, DEFAULT_PLACEMENT_DELAY};
