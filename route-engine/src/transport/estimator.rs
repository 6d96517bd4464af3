//! Transport estimation for consecutive route stops.
//!
//! Curated catalog data wins; otherwise the mode is inferred from the
//! great-circle distance. Preferences only annotate the result.

use chrono::Duration;

use crate::catalog::TransportCatalog;
use crate::config::EngineConfig;
use crate::domain::{
    Badge, Country, DurationEstimate, EstimateSource, PreferenceViolation, RoutePreferences,
    TransportMode, TransportOption, TransportSegment,
};
use crate::geography::Geography;
use crate::route::RouteState;

use super::rank::{fastest, rank_options};

/// Builds [`TransportSegment`]s from static data.
///
/// Stateless: the same inputs always give the same segments.
pub struct TransportEstimator<'a> {
    geography: &'a Geography,
    catalog: &'a TransportCatalog,
    config: &'a EngineConfig,
}

impl<'a> TransportEstimator<'a> {
    /// Create a new estimator.
    pub fn new(geography: &'a Geography, catalog: &'a TransportCatalog, config: &'a EngineConfig) -> Self {
        Self {
            geography,
            catalog,
            config,
        }
    }

    /// One segment per consecutive pair of stops.
    pub fn estimate_route(&self, state: &RouteState) -> Vec<TransportSegment> {
        state
            .entries()
            .windows(2)
            .map(|w| {
                self.estimate(
                    &w[0].city,
                    &w[0].country,
                    &w[1].city,
                    &w[1].country,
                    state.preferences(),
                )
            })
            .collect()
    }

    /// Outbound (origin → first stop) and return (last stop → origin) legs.
    ///
    /// Empty when the route has no origin or no stops.
    pub fn home_legs(&self, state: &RouteState) -> Vec<TransportSegment> {
        let (Some(origin), Some(first), Some(last)) =
            (state.origin(), state.entries().first(), state.entries().last())
        else {
            return Vec::new();
        };

        let home = self.geography.country_of(origin);
        let prefs = state.preferences();
        vec![
            self.estimate(origin, &home, &first.city, &first.country, prefs),
            self.estimate(&last.city, &last.country, origin, &home, prefs),
        ]
    }

    /// Estimate a single leg.
    pub fn estimate(
        &self,
        from: &str,
        from_country: &Country,
        to: &str,
        to_country: &Country,
        prefs: &RoutePreferences,
    ) -> TransportSegment {
        let distance_km = self.geography.distance_km(from, to);

        let options = match self.catalog.lookup(from, to) {
            Some(entry) => entry
                .legs
                .iter()
                .map(|leg| TransportOption {
                    mode: leg.mode,
                    duration: DurationEstimate::Exact(leg.duration),
                    stop_count: Some(leg.stops),
                    relative_cost: distance_km.map(|d| relative_cost(leg.mode, d)),
                    badge: Badge::None,
                    source: EstimateSource::Catalog,
                })
                .collect(),
            None => self.distance_options(distance_km),
        };

        let options = rank_options(options, self.config);

        let primary = if prefs.prefer_shortest_flights {
            fastest(&options)
        } else {
            options.iter().position(|o| o.badge == Badge::Best)
        }
        .unwrap_or(0);

        if options.is_empty() {
            return TransportSegment {
                from: from.to_string(),
                to: to.to_string(),
                distance_km,
                mode: TransportMode::Unknown,
                duration: DurationEstimate::Unknown,
                stop_count: None,
                hub_options: Vec::new(),
                badge: Badge::None,
                options,
                violations: Vec::new(),
            };
        }
        let chosen = &options[primary.min(options.len() - 1)];

        let hub_options = match chosen.stop_count {
            Some(stops) if stops > 0 => self
                .catalog
                .hubs_for(from, to, from_country, to_country)
                .iter()
                .filter(|h| !h.eq_ignore_ascii_case(from) && !h.eq_ignore_ascii_case(to))
                .take(self.config.max_hub_options)
                .cloned()
                .collect(),
            _ => Vec::new(),
        };

        let violations = violations(chosen, prefs);

        TransportSegment {
            from: from.to_string(),
            to: to.to_string(),
            distance_km,
            mode: chosen.mode,
            duration: chosen.duration,
            stop_count: chosen.stop_count,
            hub_options,
            badge: chosen.badge,
            violations,
            options,
        }
    }

    /// Options inferred from distance alone.
    fn distance_options(&self, distance_km: Option<f64>) -> Vec<TransportOption> {
        let Some(d) = distance_km else {
            return vec![TransportOption {
                mode: TransportMode::Unknown,
                duration: DurationEstimate::Unknown,
                stop_count: None,
                relative_cost: None,
                badge: Badge::None,
                source: EstimateSource::Distance,
            }];
        };

        let t = &self.config.thresholds;
        let s = &self.config.speeds;
        if d < t.car_max_km {
            vec![
                self.ground(TransportMode::Car, d, s.car_kmh),
                self.ground(TransportMode::Bus, d, s.bus_kmh),
            ]
        } else if d < t.regional_max_km {
            vec![
                self.ground(TransportMode::Train, d, s.train_kmh),
                self.ground(TransportMode::Bus, d, s.bus_kmh),
            ]
        } else if d <= t.train_max_km {
            vec![self.ground(TransportMode::Train, d, s.train_kmh)]
        } else {
            vec![TransportOption {
                mode: TransportMode::Flight,
                duration: flight_bracket(d),
                stop_count: None,
                relative_cost: Some(relative_cost(TransportMode::Flight, d)),
                badge: Badge::None,
                source: EstimateSource::Distance,
            }]
        }
    }

    fn ground(&self, mode: TransportMode, distance_km: f64, speed_kmh: f64) -> TransportOption {
        let minutes = (distance_km / speed_kmh * 60.0).round() as i64;
        TransportOption {
            mode,
            duration: DurationEstimate::Approximate(Duration::minutes(minutes)),
            stop_count: Some(0),
            relative_cost: Some(relative_cost(mode, distance_km)),
            badge: Badge::None,
            source: EstimateSource::Distance,
        }
    }
}

/// Whole-hour range for an uncurated flight.
///
/// Lower bound assumes 800 km/h plus an hour on the ground, upper bound
/// 600 km/h plus three hours, which covers a likely connection.
fn flight_bracket(distance_km: f64) -> DurationEstimate {
    let min = (distance_km / 800.0 + 1.0).floor().max(1.0) as i64;
    let max = (distance_km / 600.0 + 3.0).ceil() as i64;
    DurationEstimate::Bracket {
        min: Duration::hours(min),
        max: Duration::hours(max.max(min + 1)),
    }
}

/// Unitless cost index: a fixed fare plus a per-kilometre rate.
fn relative_cost(mode: TransportMode, distance_km: f64) -> f64 {
    let (base, per_km) = match mode {
        TransportMode::Flight => (50.0, 0.10),
        TransportMode::Train => (5.0, 0.06),
        TransportMode::Bus => (2.0, 0.04),
        TransportMode::Car => (0.0, 0.12),
        TransportMode::Unknown => (0.0, 0.0),
    };
    base + per_km * distance_km
}

/// Preferences the chosen option does not satisfy. Only flights are checked.
///
/// Alternatives in `options` are not checked; switching to one of them is
/// a presentation concern.
fn violations(option: &TransportOption, prefs: &RoutePreferences) -> Vec<PreferenceViolation> {
    if option.mode != TransportMode::Flight {
        return Vec::new();
    }

    let mut found = Vec::new();

    if let (Some(stops), Some(max)) = (option.stop_count, prefs.max_stops_per_flight.limit())
        && stops > max
    {
        found.push(PreferenceViolation::TooManyStops { stops, max });
    }

    if let Some(shortest) = option.duration.lower_bound() {
        let minutes = shortest.num_minutes();
        if minutes > i64::from(prefs.max_flight_hours) * 60 {
            found.push(PreferenceViolation::FlightTooLong {
                hours: (minutes + 59) / 60,
                max: prefs.max_flight_hours,
            });
        }
    }

    found
}
