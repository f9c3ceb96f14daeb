//! Newtype IDs for type-safe identifiers.
//!
//! Customer and gate ids are opaque strings so records written by older
//! installations keep loading; product ids are the catalog's integer keys.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate prefixed string ID newtypes.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by [`Self::generate`].
            pub const PREFIX: &'static str = $prefix;

            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID, e.g. `customer_1700000000000_k3j9x0a1b`.
            pub fn generate() -> Self {
                Self(generate_id(Self::PREFIX))
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

define_id!(CustomerId, "customer");
define_id!(GateId, "gate");

/// Catalog product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl ProductId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Millisecond timestamp plus nine random base36 characters.
fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = CustomerId::new("customer_1_abc");
        assert_eq!(id.as_str(), "customer_1_abc");
    }

    #[test]
    fn test_id_generation() {
        let id1 = GateId::generate();
        let id2 = GateId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("gate_"));
    }

    #[test]
    fn test_generated_id_shape() {
        let id = CustomerId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "customer");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&ProductId(14)).unwrap();
        assert_eq!(json, "14");
        let id: GateId = serde_json::from_str("\"gate_x\"").unwrap();
        assert_eq!(id, GateId::new("gate_x"));
    }
}
