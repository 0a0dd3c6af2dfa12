//! Shopping cart module.
//!
//! `CartState` is the reducer: a plain value changed only by applying a
//! `CartAction`. `CartStore` wraps it with the validating helpers the UI
//! calls and reports each mutation through a `Notifier`.

mod item;
mod notify;
mod state;
mod store;

pub use item::{CartItem, MAX_QUANTITY_PER_ITEM};
pub use notify::{Notifier, Toast, ToastKind, ToastQueue, TracingNotifier};
pub use state::{CartAction, CartState};
pub use store::CartStore;
