//! String-backed identifiers for points and routes.
//!
//! Both identifier kinds share the same contract: a value is valid when it is
//! non-empty and contains neither the `;` field delimiter nor control
//! characters. Invalid strings never become identifiers; places where the map
//! format needs an "absent" identifier use `Option` instead.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Field delimiter used by the points and routes files.
pub const FIELD_DELIMITER: char = ';';

/// Return `true` when `value` can be used as an identifier.
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c == FIELD_DELIMITER || c.is_control())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Build an identifier, returning `None` when the value is invalid.
            pub fn parse(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                is_valid_identifier(&value).then_some(Self(value))
            }

            /// Borrow the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self> {
                Self::parse(value).ok_or_else(|| Error::InvalidIdentifier {
                    value: value.to_string(),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                if is_valid_identifier(&value) {
                    Ok(Self(value))
                } else {
                    Err(Error::InvalidIdentifier { value })
                }
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// Identifier of a waypoint.
    PointId
}

string_id! {
    /// Identifier of a route between two waypoints.
    RouteId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_delimiter_and_control_characters() {
        assert!(PointId::parse("").is_none());
        assert!(PointId::parse("A;B").is_none());
        assert!(PointId::parse("A\tB").is_none());
        assert!(RouteId::parse("R\n").is_none());
    }

    #[test]
    fn accepts_plain_text_and_compares_case_sensitively() {
        let lower = PointId::parse("nat").expect("valid id");
        let upper = PointId::parse("NAT").expect("valid id");
        assert_ne!(lower, upper);
        assert_eq!(upper, "NAT");
        assert_eq!(upper.to_string(), "NAT");
    }

    #[test]
    fn from_str_reports_offending_value() {
        let err = "bad;id".parse::<RouteId>().expect_err("delimiter rejected");
        assert!(err.to_string().contains("bad;id"));
    }

    #[test]
    fn serde_round_trips_through_plain_strings() {
        let id: PointId = serde_json::from_str("\"FOR\"").expect("deserialize");
        assert_eq!(id.as_str(), "FOR");
        assert!(serde_json::from_str::<PointId>("\"\"").is_err());
    }
}
