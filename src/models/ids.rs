//! Strongly-typed ID wrappers for all entity types
//!
//! Identities are opaque strings. Fresh ones are random UUIDs rendered as
//! text; identities read back from import files are kept verbatim, since
//! older files may carry non-UUID keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing identity string
            ///
            /// Surrounding whitespace is removed; blank input is rejected.
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(Self(s.to_string()))
                }
            }

            /// Get the identity as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identity is blank
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(AccountId);
define_id!(CategoryId);
define_id!(OperationId);
