//! City records supplied by the trip profile.

use serde::{Deserialize, Serialize};

/// A city the traveler picked, as supplied by the trip profile store.
///
/// `tags` are free-form labels attached to the city record; they are only
/// consulted when the registry does not know the city's country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCity {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SelectedCity {
    /// Create a selected city with no tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// Attach a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

impl From<&str> for SelectedCity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_default_to_empty() {
        let city: SelectedCity = serde_json::from_str(r#"{"name":"Hoi An"}"#).unwrap();
        assert_eq!(city.name, "Hoi An");
        assert!(city.tags.is_empty());
    }

    #[test]
    fn with_tag() {
        let city = SelectedCity::new("Hoi An").with_tag("Vietnam");
        assert_eq!(city.tags, vec!["Vietnam".to_string()]);
    }
}
