//! City registry: coordinates and country classification.

use std::collections::HashMap;

use crate::domain::{Coordinates, Country};

/// What the registry knows about one city.
#[derive(Debug, Clone)]
struct CityRecord {
    name: String,
    country: Country,
    coordinates: Option<Coordinates>,
}

/// Read-only geography data injected into the engine.
///
/// Lookups are case-insensitive on ASCII. Cities may be registered without
/// coordinates; such cities still classify but have unknown distances.
#[derive(Debug, Clone, Default)]
pub struct Geography {
    /// Lowercased city name → record.
    cities: HashMap<String, CityRecord>,

    /// Lowercased country name → canonical country label.
    countries: HashMap<String, Country>,
}

impl Geography {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a city. Re-registering a name replaces the earlier record.
    pub fn add_city(
        &mut self,
        name: &str,
        country: Country,
        coordinates: Option<Coordinates>,
    ) {
        self.add_country(country.clone());
        self.cities.insert(
            name.to_ascii_lowercase(),
            CityRecord {
                name: name.to_string(),
                country,
                coordinates,
            },
        );
    }

    /// Register a country that may have no cities of its own.
    pub fn add_country(&mut self, country: Country) {
        self.countries
            .entry(country.as_str().to_ascii_lowercase())
            .or_insert(country);
    }

    /// Coordinates of a city, if known.
    pub fn coordinates_of(&self, city: &str) -> Option<Coordinates> {
        self.record(city).and_then(|r| r.coordinates)
    }

    /// Country of a city, or `"Unknown"`.
    pub fn country_of(&self, city: &str) -> Country {
        self.record(city)
            .map(|r| r.country.clone())
            .unwrap_or_else(Country::unknown)
    }

    /// Classify a city, falling back to its tags.
    ///
    /// The registry wins; otherwise the first tag naming a known country is
    /// used; otherwise the city is `"Unknown"`.
    pub fn classify(&self, city: &str, tags: &[String]) -> Country {
        if let Some(record) = self.record(city) {
            return record.country.clone();
        }

        tags.iter()
            .find_map(|tag| self.known_country(tag))
            .unwrap_or_else(Country::unknown)
    }

    /// The canonical label of a known country.
    pub fn known_country(&self, name: &str) -> Option<Country> {
        self.countries.get(&name.trim().to_ascii_lowercase()).cloned()
    }

    /// Returns true if the city is registered.
    pub fn contains(&self, city: &str) -> bool {
        self.record(city).is_some()
    }

    /// The registered spelling of a city name.
    pub fn canonical_name(&self, city: &str) -> Option<&str> {
        self.record(city).map(|r| r.name.as_str())
    }

    /// Number of registered cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if no cities are registered.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    fn record(&self, city: &str) -> Option<&CityRecord> {
        self.cities.get(&city.trim().to_ascii_lowercase())
    }
}

/// Builder for creating a geography.
///
/// Provides a fluent API for registering cities.
#[derive(Debug, Default)]
pub struct GeographyBuilder {
    inner: Geography,
}

impl GeographyBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a city with coordinates.
    ///
    /// Invalid coordinates register the city without a position.
    pub fn city(mut self, name: &str, country: &str, lat: f64, lng: f64) -> Self {
        let coordinates = Coordinates::new(lat, lng).ok();
        self.inner.add_city(name, Country::new(country), coordinates);
        self
    }

    /// Register a city whose position is not known.
    pub fn city_without_coordinates(mut self, name: &str, country: &str) -> Self {
        self.inner.add_city(name, Country::new(country), None);
        self
    }

    /// Register a country with no cities.
    pub fn country(mut self, name: &str) -> Self {
        self.inner.add_country(Country::new(name));
        self
    }

    /// Build the geography.
    pub fn build(self) -> Geography {
        self.inner
    }
}

/// Create the default registry of popular destinations.
pub fn default_geography() -> Geography {
    GeographyBuilder::new()
        // Thailand
        .city("Bangkok", "Thailand", 13.7563, 100.5018)
        .city("Chiang Mai", "Thailand", 18.7883, 98.9853)
        .city("Chiang Rai", "Thailand", 19.9105, 99.8406)
        .city("Phuket", "Thailand", 7.8804, 98.3923)
        .city("Krabi", "Thailand", 8.0863, 98.9063)
        .city("Koh Samui", "Thailand", 9.5120, 100.0136)
        .city("Ayutthaya", "Thailand", 14.3532, 100.5689)
        .city("Pattaya", "Thailand", 12.9236, 100.8825)
        // Vietnam
        .city("Hanoi", "Vietnam", 21.0278, 105.8342)
        .city("Ho Chi Minh City", "Vietnam", 10.8231, 106.6297)
        .city("Da Nang", "Vietnam", 16.0544, 108.2022)
        .city("Hoi An", "Vietnam", 15.8801, 108.3380)
        .city("Hue", "Vietnam", 16.4637, 107.5909)
        // Cambodia, Laos
        .city("Phnom Penh", "Cambodia", 11.5564, 104.9282)
        .city("Siem Reap", "Cambodia", 13.3671, 103.8448)
        .city("Luang Prabang", "Laos", 19.8856, 102.1347)
        .city("Vientiane", "Laos", 17.9757, 102.6331)
        // Malaysia, Singapore, Indonesia
        .city("Kuala Lumpur", "Malaysia", 3.1390, 101.6869)
        .city("Penang", "Malaysia", 5.4141, 100.3288)
        .city("Singapore", "Singapore", 1.3521, 103.8198)
        .city("Bali", "Indonesia", -8.3405, 115.0920)
        .city("Jakarta", "Indonesia", -6.2088, 106.8456)
        // Japan
        .city("Tokyo", "Japan", 35.6762, 139.6503)
        .city("Kyoto", "Japan", 35.0116, 135.7681)
        .city("Osaka", "Japan", 34.6937, 135.5023)
        .city("Nara", "Japan", 34.6851, 135.8048)
        .city("Hiroshima", "Japan", 34.3853, 132.4553)
        .city("Sapporo", "Japan", 43.0618, 141.3545)
        .city("Fukuoka", "Japan", 33.5904, 130.4017)
        // Korea, China
        .city("Seoul", "South Korea", 37.5665, 126.9780)
        .city("Busan", "South Korea", 35.1796, 129.0756)
        .city("Beijing", "China", 39.9042, 116.4074)
        .city("Shanghai", "China", 31.2304, 121.4737)
        .city("Hong Kong", "China", 22.3193, 114.1694)
        // South Asia, Middle East
        .city("Delhi", "India", 28.7041, 77.1025)
        .city("Mumbai", "India", 19.0760, 72.8777)
        .city("Dubai", "United Arab Emirates", 25.2048, 55.2708)
        // Europe
        .city("London", "United Kingdom", 51.5074, -0.1278)
        .city("Edinburgh", "United Kingdom", 55.9533, -3.1883)
        .city("Paris", "France", 48.8566, 2.3522)
        .city("Nice", "France", 43.7102, 7.2620)
        .city("Amsterdam", "Netherlands", 52.3676, 4.9041)
        .city("Berlin", "Germany", 52.5200, 13.4050)
        .city("Munich", "Germany", 48.1351, 11.5820)
        .city("Madrid", "Spain", 40.4168, -3.7038)
        .city("Barcelona", "Spain", 41.3874, 2.1686)
        .city("Rome", "Italy", 41.9028, 12.4964)
        .city("Florence", "Italy", 43.7696, 11.2558)
        .city("Venice", "Italy", 45.4408, 12.3155)
        .city("Milan", "Italy", 45.4642, 9.1900)
        // Oceania, Americas
        .city("Sydney", "Australia", -33.8688, 151.2093)
        .city("Melbourne", "Australia", -37.8136, 144.9631)
        .city("New York", "United States", 40.7128, -74.0060)
        .city("Los Angeles", "United States", 34.0522, -118.2437)
        // Countries travelers tag cities with but that have no registered city
        .country("Myanmar")
        .country("Philippines")
        .country("Taiwan")
        .country("Sri Lanka")
        .country("Nepal")
        .build()
}
