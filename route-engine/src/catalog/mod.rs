//! Transport data catalog.
//!
//! Curated durations and stop counts for popular city pairs, plus a table
//! of likely connection hubs between countries. Pairs are symmetric: a leg
//! registered from A to B is also found from B to A.

use std::collections::HashMap;

use chrono::Duration;

use crate::domain::{Country, TransportMode};

/// A curated way of travelling between two cities.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownLeg {
    pub mode: TransportMode,
    pub duration: Duration,
    pub stops: u32,
}

/// Everything the catalog knows about one city pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogEntry {
    /// Curated options, in registration order.
    pub legs: Vec<KnownLeg>,

    /// Known connection cities for legs with stops.
    pub hubs: Vec<String>,
}

/// Curated transport data.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalog {
    /// Map from (from, to) to entry, lowercased.
    /// Stored in both directions for O(1) lookup.
    routes: HashMap<(String, String), CatalogEntry>,

    /// Hub cities keyed by country pair, stored in both directions.
    country_hubs: HashMap<(Country, Country), Vec<String>>,
}

fn key(from: &str, to: &str) -> (String, String) {
    (from.trim().to_ascii_lowercase(), to.trim().to_ascii_lowercase())
}

impl TransportCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curated leg between two cities.
    ///
    /// The leg is stored symmetrically (both A→B and B→A).
    pub fn add_leg(&mut self, from: &str, to: &str, leg: KnownLeg) {
        self.routes
            .entry(key(from, to))
            .or_default()
            .legs
            .push(leg.clone());
        if key(from, to) != key(to, from) {
            self.routes.entry(key(to, from)).or_default().legs.push(leg);
        }
    }

    /// Set the known hub cities for a city pair.
    pub fn set_hubs(&mut self, from: &str, to: &str, hubs: Vec<String>) {
        self.routes.entry(key(from, to)).or_default().hubs = hubs.clone();
        self.routes.entry(key(to, from)).or_default().hubs = hubs;
    }

    /// Set the likely hub cities between two countries.
    pub fn set_country_hubs(&mut self, a: Country, b: Country, hubs: Vec<String>) {
        self.country_hubs.insert((a.clone(), b.clone()), hubs.clone());
        self.country_hubs.insert((b, a), hubs);
    }

    /// Look up a city pair, in either direction.
    ///
    /// Returns `None` if the pair has no curated legs.
    pub fn lookup(&self, from: &str, to: &str) -> Option<&CatalogEntry> {
        self.routes
            .get(&key(from, to))
            .filter(|entry| !entry.legs.is_empty())
    }

    /// Hub cities for a pair: the pair's own hubs, else the country table's.
    pub fn hubs_for(&self, from: &str, to: &str, from_country: &Country, to_country: &Country) -> &[String] {
        if let Some(entry) = self.routes.get(&key(from, to))
            && !entry.hubs.is_empty()
        {
            return &entry.hubs;
        }

        self.country_hubs
            .get(&(from_country.clone(), to_country.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the number of city pairs with curated legs (A→B and B→A count once).
    pub fn len(&self) -> usize {
        let mut pairs = self
            .routes
            .iter()
            .filter(|(_, entry)| !entry.legs.is_empty())
            .map(|((a, b), _)| if a <= b { (a, b) } else { (b, a) })
            .collect::<Vec<_>>();
        pairs.sort();
        pairs.dedup();
        pairs.len()
    }

    /// Returns true if the catalog has no curated legs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for creating a transport catalog.
#[derive(Debug, Default)]
pub struct TransportCatalogBuilder {
    inner: TransportCatalog,
}

impl TransportCatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curated leg; `minutes` is door-to-door duration.
    pub fn leg(mut self, from: &str, to: &str, mode: TransportMode, minutes: i64, stops: u32) -> Self {
        self.inner.add_leg(
            from,
            to,
            KnownLeg {
                mode,
                duration: Duration::minutes(minutes),
                stops,
            },
        );
        self
    }

    /// Add a nonstop flight.
    pub fn flight(self, from: &str, to: &str, minutes: i64) -> Self {
        self.leg(from, to, TransportMode::Flight, minutes, 0)
    }

    /// Add a train connection.
    pub fn train(self, from: &str, to: &str, minutes: i64) -> Self {
        self.leg(from, to, TransportMode::Train, minutes, 0)
    }

    /// Add a bus connection.
    pub fn bus(self, from: &str, to: &str, minutes: i64) -> Self {
        self.leg(from, to, TransportMode::Bus, minutes, 0)
    }

    /// Set hub cities for a city pair.
    pub fn hubs(mut self, from: &str, to: &str, hubs: &[&str]) -> Self {
        self.inner
            .set_hubs(from, to, hubs.iter().map(|h| h.to_string()).collect());
        self
    }

    /// Set hub cities between two countries.
    pub fn country_hubs(mut self, a: &str, b: &str, hubs: &[&str]) -> Self {
        self.inner.set_country_hubs(
            Country::new(a),
            Country::new(b),
            hubs.iter().map(|h| h.to_string()).collect(),
        );
        self
    }

    /// Build the catalog.
    pub fn build(self) -> TransportCatalog {
        self.inner
    }
}

/// Create the default catalog of popular routes.
///
/// Durations are typical scheduled times in minutes.
pub fn default_catalog() -> TransportCatalog {
    TransportCatalogBuilder::new()
        // Thailand domestic
        .flight("Bangkok", "Chiang Mai", 80)
        .train("Bangkok", "Chiang Mai", 690)
        .bus("Bangkok", "Chiang Mai", 600)
        .flight("Bangkok", "Phuket", 85)
        .bus("Bangkok", "Phuket", 720)
        .flight("Bangkok", "Krabi", 80)
        .flight("Bangkok", "Koh Samui", 65)
        .train("Bangkok", "Ayutthaya", 90)
        .bus("Bangkok", "Pattaya", 150)
        .flight("Chiang Mai", "Phuket", 125)
        .bus("Chiang Mai", "Chiang Rai", 180)
        .bus("Phuket", "Krabi", 180)
        // Mainland Southeast Asia
        .flight("Bangkok", "Siem Reap", 60)
        .bus("Bangkok", "Siem Reap", 480)
        .flight("Bangkok", "Luang Prabang", 100)
        .flight("Bangkok", "Hanoi", 120)
        .flight("Bangkok", "Ho Chi Minh City", 90)
        .flight("Bangkok", "Singapore", 140)
        .flight("Bangkok", "Kuala Lumpur", 125)
        .flight("Bangkok", "Bali", 270)
        .bus("Phnom Penh", "Siem Reap", 360)
        .flight("Phnom Penh", "Siem Reap", 50)
        .bus("Phnom Penh", "Ho Chi Minh City", 360)
        .bus("Luang Prabang", "Vientiane", 240)
        .flight("Hanoi", "Ho Chi Minh City", 130)
        .train("Hanoi", "Ho Chi Minh City", 1980)
        .flight("Hanoi", "Da Nang", 80)
        .train("Hanoi", "Da Nang", 960)
        .train("Da Nang", "Hue", 150)
        .leg("Da Nang", "Hoi An", TransportMode::Car, 45, 0)
        .bus("Da Nang", "Hoi An", 60)
        .flight("Singapore", "Kuala Lumpur", 60)
        .bus("Singapore", "Kuala Lumpur", 330)
        .flight("Singapore", "Bali", 165)
        // East Asia
        .flight("Bangkok", "Tokyo", 360)
        .leg("Chiang Mai", "Tokyo", TransportMode::Flight, 570, 1)
        .train("Tokyo", "Kyoto", 135)
        .bus("Tokyo", "Kyoto", 480)
        .train("Tokyo", "Osaka", 150)
        .flight("Tokyo", "Osaka", 75)
        .bus("Tokyo", "Osaka", 540)
        .train("Kyoto", "Osaka", 30)
        .train("Kyoto", "Nara", 45)
        .train("Osaka", "Hiroshima", 85)
        .flight("Tokyo", "Sapporo", 95)
        .flight("Tokyo", "Fukuoka", 115)
        .flight("Tokyo", "Seoul", 150)
        .train("Seoul", "Busan", 160)
        .flight("Hong Kong", "Bangkok", 165)
        .train("Beijing", "Shanghai", 270)
        // Europe
        .train("London", "Paris", 140)
        .flight("London", "Paris", 75)
        .train("London", "Edinburgh", 260)
        .train("Paris", "Amsterdam", 200)
        .train("Paris", "Nice", 340)
        .train("Berlin", "Munich", 240)
        .train("Madrid", "Barcelona", 150)
        .train("Rome", "Florence", 95)
        .train("Florence", "Venice", 125)
        .train("Milan", "Venice", 145)
        .train("Milan", "Florence", 115)
        // Long haul
        .flight("London", "Bangkok", 690)
        .flight("London", "Tokyo", 840)
        .flight("London", "Dubai", 420)
        .leg("London", "Sydney", TransportMode::Flight, 1320, 1)
        .hubs("London", "Sydney", &["Singapore", "Dubai", "Hong Kong"])
        .flight("Sydney", "Bangkok", 570)
        .flight("Los Angeles", "Tokyo", 690)
        .flight("New York", "London", 420)
        // Likely connection points between countries
        .country_hubs("Thailand", "Japan", &["Bangkok", "Taipei", "Hong Kong"])
        .country_hubs("Vietnam", "Japan", &["Hanoi", "Ho Chi Minh City", "Hong Kong"])
        .country_hubs("Cambodia", "Japan", &["Bangkok", "Ho Chi Minh City"])
        .country_hubs("Laos", "Japan", &["Bangkok", "Hanoi"])
        .country_hubs("United Kingdom", "Australia", &["Singapore", "Dubai", "Hong Kong"])
        .country_hubs("United Kingdom", "Thailand", &["Dubai", "Doha"])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog() {
        let catalog = TransportCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.lookup("Bangkok", "Chiang Mai").is_none());
    }

    #[test]
    fn lookup_both_directions() {
        let catalog = TransportCatalogBuilder::new()
            .flight("Bangkok", "Chiang Mai", 80)
            .build();

        let forward = catalog.lookup("Bangkok", "Chiang Mai").unwrap();
        let reverse = catalog.lookup("chiang mai", "bangkok").unwrap();
        assert_eq!(forward, reverse);
        assert_eq!(forward.legs[0].duration, Duration::minutes(80));
        assert_eq!(forward.legs[0].stops, 0);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn multiple_legs_per_pair() {
        let catalog = TransportCatalogBuilder::new()
            .flight("Tokyo", "Osaka", 75)
            .train("Tokyo", "Osaka", 150)
            .build();

        let entry = catalog.lookup("Osaka", "Tokyo").unwrap();
        assert_eq!(entry.legs.len(), 2);
        assert_eq!(entry.legs[1].mode, TransportMode::Train);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn hubs_without_legs_are_not_a_lookup_hit() {
        let catalog = TransportCatalogBuilder::new()
            .hubs("A", "B", &["C"])
            .build();

        assert!(catalog.lookup("A", "B").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn pair_hubs_win_over_country_hubs() {
        let catalog = TransportCatalogBuilder::new()
            .leg("London", "Sydney", TransportMode::Flight, 1320, 1)
            .hubs("London", "Sydney", &["Singapore"])
            .country_hubs("United Kingdom", "Australia", &["Dubai"])
            .build();

        let uk = Country::new("United Kingdom");
        let au = Country::new("Australia");
        assert_eq!(catalog.hubs_for("Sydney", "London", &au, &uk), ["Singapore"]);
        assert_eq!(catalog.hubs_for("Edinburgh", "Melbourne", &uk, &au), ["Dubai"]);
        assert!(catalog.hubs_for("Paris", "Rome", &uk, &uk).is_empty());
    }

    #[test]
    fn default_catalog_has_bangkok_chiang_mai() {
        let catalog = default_catalog();
        let entry = catalog.lookup("Bangkok", "Chiang Mai").unwrap();
        let flight = entry
            .legs
            .iter()
            .find(|l| l.mode == TransportMode::Flight)
            .unwrap();
        assert_eq!(flight.duration, Duration::minutes(80));
        assert_eq!(flight.stops, 0);
    }
}
