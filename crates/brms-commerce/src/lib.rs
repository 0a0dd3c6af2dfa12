//! Ordering domain logic for the Bar & Restaurant Management System (BRMS).
//!
//! This crate owns everything between "customer taps add" and "order
//! confirmed":
//!
//! - **Catalog**: menu items that can be turned into cart lines
//! - **Cart**: the reducer-driven cart state and the store that wraps it
//! - **Pricing**: the one place subtotal, tax and delivery fee are computed
//! - **Checkout**: the cart → delivery → billing → payment wizard, orders,
//!   and order placement
//!
//! # Example
//!
//! ```rust
//! use brms_commerce::prelude::*;
//!
//! let mut cart = CartStore::new(ToastQueue::new());
//! let item = MenuItem::new("prod-1", "Brochette", Money::rwf(1000), "grill")
//!     .to_cart_item(2)
//!     .unwrap();
//! cart.add_item(item).unwrap();
//!
//! let totals = PricingConfig::default()
//!     .quote(cart.items(), DeliveryMethod::Delivery1Hour)
//!     .unwrap();
//! assert_eq!(totals.subtotal, Money::rwf(2000));
//! assert_eq!(totals.tax, Money::rwf(160));
//! assert_eq!(totals.total, Money::rwf(5160));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::MenuItem;

    // Cart
    pub use crate::cart::{
        CartAction, CartItem, CartState, CartStore, Notifier, Toast, ToastKind, ToastQueue,
        TracingNotifier, MAX_QUANTITY_PER_ITEM,
    };

    // Pricing
    pub use crate::pricing::{calculate_totals, DeliveryFees, PricingConfig, Totals};

    // Checkout
    pub use crate::checkout::{
        BillingDetails, CheckoutFlow, CheckoutStep, DeliveryDetails, DeliveryMethod, Order,
        OrderPlacer, OrderStatus, PaymentDetails, PaymentMethod, PaymentSummary,
        PlacementReceipt, SimulatedPlacer,
    };
}
