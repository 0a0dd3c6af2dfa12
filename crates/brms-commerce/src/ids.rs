//! Newtype IDs for type-safe identifiers.
//!
//! A cart line id and a product id are both strings on the wire, but they
//! must never be confused: the reducer coalesces by product and removes by
//! line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CartLineId, "line");
define_id!(ProductId, "prod");
define_id!(BusinessId, "biz");
define_id!(OrderId, "ord");
define_id!(CheckoutId, "chk");
define_id!(UserId, "user");

/// Generate a unique ID from the current time and random bits.
fn generate_id(prefix: &str) -> String {
    use rand::Rng;

    let millis = chrono::Utc::now().timestamp_millis();
    let entropy: u32 = rand::thread_rng().gen();
    format!("{prefix}_{millis:x}{entropy:08x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_generation() {
        let id1 = CartLineId::generate();
        let id2 = CartLineId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("line_"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("prod-9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"prod-9\"");
    }

    #[test]
    fn test_id_display() {
        let id = OrderId::new("ord-789");
        assert_eq!(format!("{}", id), "ord-789");
    }
}
