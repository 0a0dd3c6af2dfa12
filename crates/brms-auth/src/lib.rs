//! Roles and session context for BRMS.
//!
//! The logged-in user lives under the `brms_user` key of a [`KvStore`].
//! Nothing reads that key directly: [`SessionManager`] owns its lifecycle
//! and hands out a [`SessionContext`], which callers pass on explicitly
//! (for example to pre-fill the checkout billing form).
//!
//! Authentication itself happens elsewhere; `login` records a profile the
//! backend already vouched for.
//!
//! ```rust
//! use brms_auth::{Role, SessionConfig, SessionManager, UserProfile};
//! use brms_storage::MemoryStore;
//!
//! let sessions = SessionManager::new(MemoryStore::new(), SessionConfig::default());
//! let profile = UserProfile::new("user-1", Role::Customer, "Aline", "aline@example.rw");
//! sessions.login(profile).unwrap();
//!
//! let ctx = sessions.current().unwrap().unwrap();
//! assert_eq!(ctx.billing_details().email, "aline@example.rw");
//! ```
//!
//! [`KvStore`]: brms_storage::KvStore

mod error;
mod session;
mod user;

pub use error::AuthError;
pub use session::{SessionConfig, SessionContext, SessionId, SessionManager, SESSION_KEY};
pub use user::{Role, StoredUser, UserProfile};
