//! Engine configuration.
//!
//! Every heuristic constant the engine relies on lives here so it can be
//! tuned without touching the algorithms.

use chrono::Duration;

/// Distance thresholds used to pick a transport mode when no curated data
/// exists for a pair of cities.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeThresholds {
    /// Below this distance (km) the leg is driven or bussed.
    pub car_max_km: f64,

    /// Below this distance (km) the leg goes by train or bus.
    pub regional_max_km: f64,

    /// Below this distance (km) the leg goes by train.
    /// Anything longer is a flight.
    pub train_max_km: f64,
}

impl Default for ModeThresholds {
    fn default() -> Self {
        Self {
            car_max_km: 100.0,
            regional_max_km: 300.0,
            train_max_km: 500.0,
        }
    }
}

/// Average speeds (km/h) for distance-based duration estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSpeeds {
    pub car_kmh: f64,
    pub bus_kmh: f64,
    pub train_kmh: f64,
}

impl Default for ModeSpeeds {
    fn default() -> Self {
        Self {
            car_kmh: 70.0,
            bus_kmh: 55.0,
            train_kmh: 90.0,
        }
    }
}

/// Configuration parameters for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// A middle stop is a detour when `d(A, C) < backtrack_ratio * d(A, B)`.
    pub backtrack_ratio: f64,

    /// Distance thresholds for mode classification.
    pub thresholds: ModeThresholds,

    /// Speeds for ground estimates.
    pub speeds: ModeSpeeds,

    /// Rank assigned to countries missing from the rank table.
    pub unknown_country_rank: u32,

    /// Maximum hub cities attached to a segment.
    pub max_hub_options: usize,

    /// Weight of travel hours in the "best" score.
    pub time_weight: f64,

    /// Weight of relative cost in the "best" score.
    pub cost_weight: f64,

    /// Concurrent enrichment requests per wave.
    pub enrichment_window: usize,

    /// Quiet period before a state change is persisted (milliseconds).
    pub save_debounce_ms: i64,
}

impl EngineConfig {
    /// Create a new configuration with the given heuristic parameters and
    /// defaults for everything else.
    pub fn new(backtrack_ratio: f64, thresholds: ModeThresholds, enrichment_window: usize) -> Self {
        Self {
            backtrack_ratio,
            thresholds,
            enrichment_window,
            ..Self::default()
        }
    }

    /// Returns the save debounce period as a Duration.
    pub fn save_debounce(&self) -> Duration {
        Duration::milliseconds(self.save_debounce_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backtrack_ratio: 0.5,
            thresholds: ModeThresholds::default(),
            speeds: ModeSpeeds::default(),
            unknown_country_rank: 99,
            max_hub_options: 3,
            time_weight: 1.0,
            cost_weight: 0.5,
            enrichment_window: 3,
            save_debounce_ms: 500,
        }
    }
}
