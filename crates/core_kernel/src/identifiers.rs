//! Strongly-typed references for claim-level entities
//!
//! Claim references arrive from upstream systems as free-form strings, so
//! these are newtypes over `String` rather than UUIDs. Each reference type
//! carries a sentinel used when the upstream value is missing or blank, so a
//! normalized record never holds an empty reference.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_reference {
    ($name:ident, $sentinel:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a reference, falling back to the sentinel when blank
            pub fn new(value: impl Into<String>) -> Self {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Self::unknown()
                } else {
                    Self(trimmed.to_string())
                }
            }

            /// Returns the sentinel reference
            pub fn unknown() -> Self {
                Self($sentinel.to_string())
            }

            /// Returns the sentinel value
            pub fn sentinel() -> &'static str {
                $sentinel
            }

            /// Returns true if this reference is the sentinel
            pub fn is_unknown(&self) -> bool {
                self.0 == $sentinel
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::unknown()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Claim file reference as issued by the intake channel
define_reference!(ClaimId, "UNK-000");

// Vehicle registration plate
define_reference!(RegistrationPlate, "SIN-MAT");

/// Placeholder for optional free-text fields that were not supplied
pub const NOT_AVAILABLE: &str = "N/A";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_claim_id_uses_sentinel() {
        assert_eq!(ClaimId::new("   ").as_str(), "UNK-000");
        assert!(ClaimId::default().is_unknown());
    }

    #[test]
    fn test_reference_is_trimmed() {
        let plate = RegistrationPlate::new(" 1234ABC ");
        assert_eq!(plate.to_string(), "1234ABC");
        assert!(!plate.is_unknown());
    }

    #[test]
    fn test_plate_sentinel() {
        assert_eq!(RegistrationPlate::sentinel(), "SIN-MAT");
    }
}
