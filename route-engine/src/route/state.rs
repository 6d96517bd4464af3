//! The route state aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::{Country, RoutePreferences};

/// Opaque identifier of one occurrence of a city in a route.
///
/// Ids are allocated per state and never reused, so two occurrences of the
/// same city (a stopover) are always distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub(crate) u64);

impl EntryId {
    /// The raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One stop in the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub id: EntryId,
    pub city: String,
    pub country: Country,
}

/// A selected city kept off the active route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedCity {
    pub city: String,
    pub country: Country,
}

/// Lifecycle of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    /// No stops yet.
    Empty,
    /// At least one stop.
    Populated,
}

/// The editable multi-city route.
///
/// Invariants, maintained by every editor operation:
/// - no parked city appears in `entries`
/// - `country_order` holds each country present in `entries` exactly once
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    pub(crate) entries: Vec<RouteEntry>,
    pub(crate) country_order: Vec<Country>,
    pub(crate) parked: Vec<ParkedCity>,
    #[serde(default)]
    pub(crate) preferences: RoutePreferences,
    #[serde(default)]
    pub(crate) origin: Option<String>,
    pub(crate) next_entry_id: u64,
}

impl RouteState {
    /// Create an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops in visiting order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// City names in visiting order.
    pub fn order(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.city.as_str()).collect()
    }

    /// Countries in visiting order.
    pub fn country_order(&self) -> &[Country] {
        &self.country_order
    }

    /// Cities set aside for later.
    pub fn parked(&self) -> &[ParkedCity] {
        &self.parked
    }

    /// Returns true if the city is parked.
    pub fn is_parked(&self, city: &str) -> bool {
        self.parked.iter().any(|p| p.city == city)
    }

    /// Returns true if the city occurs in the active route.
    pub fn contains(&self, city: &str) -> bool {
        self.entries.iter().any(|e| e.city == city)
    }

    /// Number of occurrences of a city in the active route.
    pub fn occurrences(&self, city: &str) -> usize {
        self.entries.iter().filter(|e| e.city == city).count()
    }

    /// Position of an entry by id.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Current preferences.
    pub fn preferences(&self) -> &RoutePreferences {
        &self.preferences
    }

    /// Home city, if set.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifecycle status.
    pub fn status(&self) -> RouteStatus {
        if self.entries.is_empty() {
            RouteStatus::Empty
        } else {
            RouteStatus::Populated
        }
    }

    /// Country of a city known to this route, active or parked.
    pub(crate) fn known_country(&self, city: &str) -> Option<Country> {
        self.entries
            .iter()
            .find(|e| e.city == city)
            .map(|e| e.country.clone())
            .or_else(|| {
                self.parked
                    .iter()
                    .find(|p| p.city == city)
                    .map(|p| p.country.clone())
            })
    }

    /// Allocate a fresh entry.
    pub(crate) fn new_entry(&mut self, city: String, country: Country) -> RouteEntry {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        RouteEntry { id, city, country }
    }

    /// Bring `country_order` back in line with `entries`.
    ///
    /// Vanished countries are dropped. A newly present country is placed
    /// right after the country of the entry preceding its first occurrence,
    /// or first if nothing precedes it.
    pub(crate) fn sync_country_order(&mut self) {
        let entries = &self.entries;
        self.country_order
            .retain(|c| entries.iter().any(|e| &e.country == c));

        for i in 0..self.entries.len() {
            let country = &self.entries[i].country;
            if self.country_order.contains(country) {
                continue;
            }

            let pos = self.entries[..i]
                .iter()
                .rev()
                .find_map(|e| self.country_order.iter().position(|c| c == &e.country))
                .map(|p| p + 1)
                .unwrap_or(0);
            self.country_order.insert(pos, country.clone());
        }
    }
}
