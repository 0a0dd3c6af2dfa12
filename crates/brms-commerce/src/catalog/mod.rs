//! Menu catalog module.
//!
//! Menu items are what a business lists; cart lines are what a customer
//! holds. The catalog only knows how to turn the former into the latter.

mod menu;

pub use menu::MenuItem;
