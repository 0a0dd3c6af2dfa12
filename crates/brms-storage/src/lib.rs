//! Typed JSON key-value storage for BRMS.
//!
//! The web client kept its state in browser local storage. This crate gives
//! the same shape to native code: string keys, JSON values, and two
//! backends.
//!
//! - [`MemoryStore`]: process-local, for tests and one-shot runs
//! - [`FileStore`]: a single JSON object on disk, rewritten on every mutation
//!
//! # Example
//!
//! ```rust
//! use brms_storage::{KvStore, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Prefs {
//!     currency: String,
//! }
//!
//! let store = MemoryStore::new();
//! store.set("prefs", &Prefs { currency: "RWF".into() }).unwrap();
//!
//! let prefs: Option<Prefs> = store.get("prefs").unwrap();
//! assert_eq!(prefs.unwrap().currency, "RWF");
//!
//! store.delete("prefs").unwrap();
//! assert!(!store.exists("prefs").unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KvStore, MemoryStore, StorageError};
}
