//! Country labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the pseudo-country for cities that cannot be classified.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A country name used as a grouping key.
///
/// Countries have no lifecycle of their own: they are derived from cities
/// and only exist as labels for sequencing and segment boundaries.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    /// Create a country label.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `"Unknown"` pseudo-country.
    pub fn unknown() -> Self {
        Self(UNKNOWN_COUNTRY.to_string())
    }

    /// Returns true for the `"Unknown"` pseudo-country.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_COUNTRY
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Country({})", self.0)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Country {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
