//! Country sequencing by distance from home.

use std::collections::HashMap;

use crate::domain::Country;

/// Fixed table of "distance from home" ranks.
///
/// Lower ranks are closer to home and are visited first. Countries missing
/// from the table get `default_rank`, so they sort after every known one.
#[derive(Debug, Clone)]
pub struct CountryRanks {
    ranks: HashMap<Country, u32>,
    default_rank: u32,
}

impl CountryRanks {
    /// Create an empty table where every country has `default_rank`.
    pub fn new(default_rank: u32) -> Self {
        Self {
            ranks: HashMap::new(),
            default_rank,
        }
    }

    /// Set the rank of a country.
    pub fn set(&mut self, country: Country, rank: u32) {
        self.ranks.insert(country, rank);
    }

    /// Set the rank of a country, builder style.
    pub fn with(mut self, country: &str, rank: u32) -> Self {
        self.set(Country::new(country), rank);
        self
    }

    /// Rank of a country.
    pub fn rank(&self, country: &Country) -> u32 {
        self.ranks.get(country).copied().unwrap_or(self.default_rank)
    }

    /// Order distinct countries by rank.
    ///
    /// `countries` is taken in first-seen order; duplicates are dropped and
    /// ties keep first-seen order.
    pub fn sequence<'a, I>(&self, countries: I) -> Vec<Country>
    where
        I: IntoIterator<Item = &'a Country>,
    {
        let mut distinct: Vec<Country> = Vec::new();
        for country in countries {
            if !distinct.contains(country) {
                distinct.push(country.clone());
            }
        }

        // sort_by_key is stable, which keeps first-seen order for ties
        distinct.sort_by_key(|c| self.rank(c));
        distinct
    }
}

/// Default rank table for a traveler based in Western Europe.
pub fn default_ranks(default_rank: u32) -> CountryRanks {
    CountryRanks::new(default_rank)
        .with("United Kingdom", 0)
        .with("France", 1)
        .with("Netherlands", 1)
        .with("Germany", 2)
        .with("Spain", 2)
        .with("Italy", 3)
        .with("United Arab Emirates", 6)
        .with("India", 7)
        .with("United States", 7)
        .with("Nepal", 7)
        .with("Sri Lanka", 8)
        .with("Myanmar", 8)
        .with("Thailand", 8)
        .with("Laos", 9)
        .with("Cambodia", 9)
        .with("Vietnam", 9)
        .with("Malaysia", 10)
        .with("Singapore", 10)
        .with("China", 10)
        .with("Indonesia", 11)
        .with("Philippines", 11)
        .with("Taiwan", 11)
        .with("South Korea", 11)
        .with("Japan", 12)
        .with("Australia", 14)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries(names: &[&str]) -> Vec<Country> {
        names.iter().map(|n| Country::new(*n)).collect()
    }

    #[test]
    fn sorts_by_rank() {
        let ranks = CountryRanks::new(99).with("Japan", 5).with("Thailand", 1);
        let order = ranks.sequence(&countries(&["Japan", "Thailand"]));
        assert_eq!(order, countries(&["Thailand", "Japan"]));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let ranks = CountryRanks::new(99).with("Laos", 3).with("Cambodia", 3);
        let order = ranks.sequence(&countries(&["Laos", "Cambodia"]));
        assert_eq!(order, countries(&["Laos", "Cambodia"]));

        let order = ranks.sequence(&countries(&["Cambodia", "Laos"]));
        assert_eq!(order, countries(&["Cambodia", "Laos"]));
    }

    #[test]
    fn unknown_countries_sort_last() {
        let ranks = CountryRanks::new(99).with("Japan", 12);
        let order = ranks.sequence(&countries(&["Unknown", "Atlantis", "Japan"]));
        assert_eq!(order, countries(&["Japan", "Unknown", "Atlantis"]));
    }

    #[test]
    fn duplicates_are_dropped() {
        let ranks = CountryRanks::new(99);
        let order = ranks.sequence(&countries(&["Japan", "Japan", "Laos", "Japan"]));
        assert_eq!(order, countries(&["Japan", "Laos"]));
    }

    #[test]
    fn default_table() {
        let ranks = default_ranks(99);
        assert!(ranks.rank(&Country::new("France")) < ranks.rank(&Country::new("Japan")));
        assert_eq!(ranks.rank(&Country::unknown()), 99);
    }
}
