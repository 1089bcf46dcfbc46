//! Newtype IDs for type-safe identifiers.
//!
//! A cart line is keyed by the part's catalog number, an account by its
//! trade id; keeping them as distinct types stops one being passed where
//! the other is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
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

define_id!(
    /// Cart line identity, derived from the part's catalog number.
    PartId
);
define_id!(
    /// Trade account identifier (e.g. `TRD-001`).
    TradeAccountId
);
define_id!(
    /// Customer-facing order number (e.g. `APX-M2K7Q1ZT`).
    OrderNumber
);

impl OrderNumber {
    /// Build an order number from a millisecond timestamp, rendered in
    /// upper-case base 36.
    pub fn from_millis(millis: u64) -> Self {
        Self(format!("APX-{}", to_base36(millis)))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: PartId = "HU7020z".into();
        assert_eq!(id.as_str(), "HU7020z");
        assert_eq!(format!("{}", id), "HU7020z");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PartId::new("P659")).unwrap();
        assert_eq!(json, r#""P659""#);
    }

    #[test]
    fn test_order_number_base36() {
        assert_eq!(OrderNumber::from_millis(0).as_str(), "APX-0");
        assert_eq!(OrderNumber::from_millis(35).as_str(), "APX-Z");
        assert_eq!(OrderNumber::from_millis(36).as_str(), "APX-10");
        assert_eq!(
            OrderNumber::from_millis(1_700_000_000_000).as_str(),
            "APX-LOYW3V28"
        );
    }
}
