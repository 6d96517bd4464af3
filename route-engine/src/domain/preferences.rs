//! Traveler transport preferences.

use serde::{Deserialize, Serialize};

/// Maximum number of stops accepted on a single flight.
///
/// Serialized as `0`, `1` or `2`, where `2` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MaxStops {
    /// Direct flights only.
    Nonstop,
    /// At most one connection.
    OneStop,
    /// Any number of connections.
    #[default]
    Any,
}

impl MaxStops {
    /// Returns true if a flight with `stops` connections is acceptable.
    pub fn allows(self, stops: u32) -> bool {
        match self {
            MaxStops::Nonstop => stops == 0,
            MaxStops::OneStop => stops <= 1,
            MaxStops::Any => true,
        }
    }

    /// The numeric limit, or `None` when unlimited.
    pub fn limit(self) -> Option<u32> {
        match self {
            MaxStops::Nonstop => Some(0),
            MaxStops::OneStop => Some(1),
            MaxStops::Any => None,
        }
    }
}

impl TryFrom<u8> for MaxStops {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MaxStops::Nonstop),
            1 => Ok(MaxStops::OneStop),
            2 => Ok(MaxStops::Any),
            other => Err(format!("max stops must be 0, 1 or 2, got {other}")),
        }
    }
}

impl From<MaxStops> for u8 {
    fn from(value: MaxStops) -> Self {
        match value {
            MaxStops::Nonstop => 0,
            MaxStops::OneStop => 1,
            MaxStops::Any => 2,
        }
    }
}

/// Preferences applied when annotating transport segments.
///
/// Pure configuration: preferences flag segments, they never change the
/// route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePreferences {
    /// Pick the fastest option as the primary one for each segment.
    pub prefer_shortest_flights: bool,

    /// Maximum connections per flight.
    pub max_stops_per_flight: MaxStops,

    /// Maximum flights per travel day.
    ///
    /// Routes carry no day assignment, so this is stored for the
    /// presentation layer and not evaluated per segment.
    pub max_flights_per_day: u32,

    /// Maximum acceptable flight duration in hours.
    pub max_flight_hours: u32,
}

impl Default for RoutePreferences {
    fn default() -> Self {
        Self {
            prefer_shortest_flights: false,
            max_stops_per_flight: MaxStops::Any,
            max_flights_per_day: 2,
            max_flight_hours: 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_stops_allows() {
        assert!(MaxStops::Nonstop.allows(0));
        assert!(!MaxStops::Nonstop.allows(1));
        assert!(MaxStops::OneStop.allows(1));
        assert!(!MaxStops::OneStop.allows(2));
        assert!(MaxStops::Any.allows(5));
    }

    #[test]
    fn max_stops_wire_values() {
        assert_eq!(serde_json::to_string(&MaxStops::Any).unwrap(), "2");
        let parsed: MaxStops = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, MaxStops::OneStop);
        assert!(serde_json::from_str::<MaxStops>("3").is_err());
    }

    #[test]
    fn default_preferences() {
        let prefs = RoutePreferences::default();
        assert!(!prefs.prefer_shortest_flights);
        assert_eq!(prefs.max_stops_per_flight, MaxStops::Any);
        assert_eq!(prefs.max_flights_per_day, 2);
        assert_eq!(prefs.max_flight_hours, 12);
    }

    #[test]
    fn camel_case_fields() {
        let json = serde_json::to_value(RoutePreferences::default()).unwrap();
        assert!(json.get("preferShortestFlights").is_some());
        assert_eq!(json["maxStopsPerFlight"], 2);
    }
}
