//! Transport segment types.
//!
//! Segments are ephemeral annotations of a route: they are recomputed from
//! two city names and the current preferences and are never persisted.

use std::fmt;

use chrono::Duration;

/// Mode of transport for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Unknown,
}

impl TransportMode {
    /// Lowercase label of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranking badge attached to a transport option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    Best,
    Fastest,
    Cheapest,
    #[default]
    None,
}

/// How much is known about a leg's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationEstimate {
    /// Curated duration from the transport catalog.
    Exact(Duration),
    /// Speed-based estimate for a ground leg.
    Approximate(Duration),
    /// Rough whole-hour range for a long leg with no curated data.
    Bracket { min: Duration, max: Duration },
    /// No coordinates, so nothing can be estimated.
    Unknown,
}

impl DurationEstimate {
    /// The curated duration, if any.
    pub fn exact(&self) -> Option<Duration> {
        match self {
            DurationEstimate::Exact(d) => Some(*d),
            _ => None,
        }
    }

    /// A single representative duration used for ranking.
    ///
    /// Brackets use their midpoint.
    pub fn representative(&self) -> Option<Duration> {
        match self {
            DurationEstimate::Exact(d) | DurationEstimate::Approximate(d) => Some(*d),
            DurationEstimate::Bracket { min, max } => Some((*min + *max) / 2),
            DurationEstimate::Unknown => None,
        }
    }

    /// The shortest duration the estimate allows.
    pub fn lower_bound(&self) -> Option<Duration> {
        match self {
            DurationEstimate::Exact(d) | DurationEstimate::Approximate(d) => Some(*d),
            DurationEstimate::Bracket { min, .. } => Some(*min),
            DurationEstimate::Unknown => None,
        }
    }
}

/// Where an option's figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    Catalog,
    Distance,
}

/// One way of travelling between two cities.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportOption {
    pub mode: TransportMode,
    pub duration: DurationEstimate,
    /// Number of connections; `None` when not known.
    pub stop_count: Option<u32>,
    /// Relative cost index, unitless. Only comparable within one segment.
    pub relative_cost: Option<f64>,
    pub badge: Badge,
    pub source: EstimateSource,
}

/// A preference that an estimated leg does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceViolation {
    /// The flight has more connections than allowed.
    TooManyStops { stops: u32, max: u32 },
    /// The flight takes longer than allowed.
    FlightTooLong { hours: i64, max: u32 },
}

impl fmt::Display for PreferenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceViolation::TooManyStops { stops, max } => {
                write!(f, "{stops} stops exceeds the limit of {max}")
            }
            PreferenceViolation::FlightTooLong { hours, max } => {
                write!(f, "{hours}h flight exceeds the limit of {max}h")
            }
        }
    }
}

/// Transport annotation for one pair of consecutive route stops.
///
/// The top-level fields describe the primary option; `options` holds every
/// ranked alternative, including the primary one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSegment {
    pub from: String,
    pub to: String,
    pub distance_km: Option<f64>,
    pub mode: TransportMode,
    pub duration: DurationEstimate,
    pub stop_count: Option<u32>,
    /// Possible connection cities when the leg has stops. Informational.
    pub hub_options: Vec<String>,
    pub badge: Badge,
    pub options: Vec<TransportOption>,
    /// Preferences the chosen option breaks. Alternatives are not checked.
    pub violations: Vec<PreferenceViolation>,
}

impl TransportSegment {
    /// Returns true if any preference is violated.
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns the option carrying `badge`, if any.
    pub fn option_with_badge(&self, badge: Badge) -> Option<&TransportOption> {
        self.options.iter().find(|o| o.badge == badge)
    }
}
