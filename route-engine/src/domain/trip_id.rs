//! Trip identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a trip identifier.
const MAX_LEN: usize = 64;

/// Error returned when parsing an invalid trip identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip id: {reason}")]
pub struct InvalidTripId {
    reason: &'static str,
}

/// Identifier of a trip in the profile store.
///
/// Trip ids are 1-64 characters of ASCII letters, digits, `-` or `_`, so
/// they are always safe to use as file names.
///
/// # Examples
///
/// ```
/// use route_engine::domain::TripId;
///
/// let id = TripId::parse("summer-2026").unwrap();
/// assert_eq!(id.as_str(), "summer-2026");
///
/// assert!(TripId::parse("").is_err());
/// assert!(TripId::parse("../etc").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TripId(String);

impl TripId {
    /// Parse a trip identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidTripId> {
        if s.is_empty() {
            return Err(InvalidTripId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidTripId {
                reason: "must be at most 64 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidTripId {
                reason: "must contain only ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TripId {
    type Error = InvalidTripId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TripId> for String {
    fn from(id: TripId) -> Self {
        id.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Za-z0-9_-]{1,64}") {
            let id = TripId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Anything containing a path separator is rejected
        #[test]
        fn separators_rejected(a in "[a-z]{0,5}", b in "[a-z]{0,5}") {
            let with_slash = format!("{a}/{b}");
            prop_assert!(TripId::parse(&with_slash).is_err());
        }
    }
}
