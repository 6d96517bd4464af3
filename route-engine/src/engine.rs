//! Route engine facade.
//!
//! Every command takes the current [`RouteState`] by value and hands back
//! the updated state, so callers never observe a half-applied edit.

use std::sync::Arc;

use crate::catalog::{TransportCatalog, default_catalog};
use crate::config::EngineConfig;
use crate::domain::{Country, RoutePreferences, SelectedCity, TransportSegment};
use crate::geography::{Geography, default_geography};
use crate::route::{RouteEditor, RouteState};
use crate::sequencer::{CountryRanks, HubSeeds, default_ranks};
use crate::transport::TransportEstimator;

/// Plans and edits multi-city routes against injected static data.
///
/// Cheap to clone; the lookup tables are shared.
#[derive(Debug, Clone)]
pub struct RouteEngine {
    geography: Arc<Geography>,
    catalog: Arc<TransportCatalog>,
    ranks: Arc<CountryRanks>,
    hub_seeds: Arc<HubSeeds>,
    config: Arc<EngineConfig>,
}

impl RouteEngine {
    /// Create an engine from its lookup tables.
    pub fn new(
        geography: Geography,
        catalog: TransportCatalog,
        ranks: CountryRanks,
        config: EngineConfig,
    ) -> Self {
        Self {
            geography: Arc::new(geography),
            catalog: Arc::new(catalog),
            ranks: Arc::new(ranks),
            hub_seeds: Arc::new(HubSeeds::new()),
            config: Arc::new(config),
        }
    }

    /// Engine with the built-in destination tables.
    pub fn with_defaults() -> Self {
        let config = EngineConfig::default();
        Self::new(
            default_geography(),
            default_catalog(),
            default_ranks(config.unknown_country_rank),
            config,
        )
    }

    /// Seed city ordering from preferred hubs instead of trying every city.
    pub fn with_hub_seeds(mut self, hub_seeds: HubSeeds) -> Self {
        self.hub_seeds = Arc::new(hub_seeds);
        self
    }

    /// The geography this engine plans against.
    pub fn geography(&self) -> &Geography {
        &self.geography
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn editor(&self) -> RouteEditor<'_> {
        RouteEditor::new(&self.geography, &self.ranks, &self.hub_seeds, &self.config)
    }

    fn estimator(&self) -> TransportEstimator<'_> {
        TransportEstimator::new(&self.geography, &self.catalog, &self.config)
    }

    /// Build a fresh route from the traveler's selection.
    pub fn compute_initial_route(&self, selected: &[SelectedCity], origin: Option<&str>) -> RouteState {
        let mut state = RouteState::new();
        self.editor().populate(&mut state, selected, origin);
        state
    }

    /// Apply a user-chosen country sequence.
    ///
    /// Anything other than a permutation of the current order leaves the
    /// state unchanged.
    pub fn set_country_order(&self, mut state: RouteState, new_order: &[Country]) -> RouteState {
        self.editor().reorder_countries(&mut state, new_order);
        state
    }

    /// Reset the country sequence to the rank table order.
    pub fn resequence_countries(&self, mut state: RouteState) -> RouteState {
        self.editor().resequence_countries(&mut state);
        state
    }

    /// Insert a city at `index` (clamped).
    pub fn insert_city(&self, mut state: RouteState, city: impl Into<SelectedCity>, index: usize) -> RouteState {
        self.editor().insert(&mut state, &city.into(), index);
        state
    }

    /// Remove the stop at `index`.
    pub fn remove_city(&self, mut state: RouteState, index: usize) -> RouteState {
        self.editor().remove(&mut state, index);
        state
    }

    /// Move the stop at `from` to `to`.
    pub fn move_city(&self, mut state: RouteState, from: usize, to: usize) -> RouteState {
        self.editor().move_entry(&mut state, from, to);
        state
    }

    /// Take a city off the route without forgetting it.
    pub fn park_city(&self, mut state: RouteState, city: &str) -> RouteState {
        self.editor().park(&mut state, city);
        state
    }

    /// Return a parked city to the route.
    pub fn unpark_city(&self, mut state: RouteState, city: &str) -> RouteState {
        self.editor().unpark(&mut state, city);
        state
    }

    /// Reorder cities within each country.
    pub fn optimize_route(&self, mut state: RouteState) -> RouteState {
        self.editor().optimize(&mut state);
        state
    }

    /// Returns true if the route doubles back on itself within a country.
    pub fn detect_inefficiency(&self, state: &RouteState) -> bool {
        self.editor().detect_inefficiency(state)
    }

    /// Positions of the stops that cause a detour.
    pub fn inefficient_triples(&self, state: &RouteState) -> Vec<usize> {
        self.editor().inefficient_stops(state)
    }

    /// Transport estimates between consecutive stops.
    pub fn estimate_segments(&self, state: &RouteState) -> Vec<TransportSegment> {
        self.estimator().estimate_route(state)
    }

    /// Legs from the origin to the first stop and back from the last.
    pub fn home_legs(&self, state: &RouteState) -> Vec<TransportSegment> {
        self.estimator().home_legs(state)
    }

    /// Replace the transport preferences.
    pub fn set_preferences(&self, mut state: RouteState, prefs: RoutePreferences) -> RouteState {
        state.preferences = prefs;
        state
    }
}

impl Default for RouteEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DurationEstimate, MaxStops, PreferenceViolation, TransportMode};
    use crate::geography::GeographyBuilder;

    fn engine() -> RouteEngine {
        RouteEngine::with_defaults()
    }

    fn select(names: &[&str]) -> Vec<SelectedCity> {
        names.iter().map(|n| SelectedCity::new(*n)).collect()
    }

    #[test]
    fn thailand_triangle_starts_in_the_north() {
        let engine = engine();
        let state = engine.compute_initial_route(&select(&["Bangkok", "Chiang Mai", "Phuket"]), None);

        assert_eq!(state.order(), vec!["Chiang Mai", "Bangkok", "Phuket"]);
        assert_eq!(state.country_order(), &[Country::new("Thailand")]);
    }

    #[test]
    fn kyoto_backtrack_is_detected_and_fixed() {
        let engine = engine();
        let mut state = RouteState::new();
        for (i, city) in ["Kyoto", "Tokyo", "Osaka"].into_iter().enumerate() {
            state = engine.insert_city(state, city, i);
        }

        assert!(engine.detect_inefficiency(&state));
        assert_eq!(engine.inefficient_triples(&state), vec![1]);

        let state = engine.optimize_route(state);
        assert_eq!(state.order(), vec!["Tokyo", "Kyoto", "Osaka"]);
        assert!(!engine.detect_inefficiency(&state));
    }

    #[test]
    fn optimize_never_produces_a_same_city_segment() {
        let engine = engine();
        let mut state = RouteState::new();
        for (i, city) in ["Bangkok", "Bangkok", "Chiang Mai", "Phuket"].into_iter().enumerate() {
            state = engine.insert_city(state, city, i);
        }

        let state = engine.optimize_route(state);
        assert_eq!(state.occurrences("Bangkok"), 2);
        assert!(engine.estimate_segments(&state).iter().all(|s| s.from != s.to));
    }

    #[test]
    fn city_without_coordinates_goes_last() {
        let geography = GeographyBuilder::new()
            .city("Bangkok", "Thailand", 13.7563, 100.5018)
            .city("Chiang Mai", "Thailand", 18.7883, 98.9853)
            .city_without_coordinates("Pai", "Thailand")
            .build();
        let engine = RouteEngine::new(
            geography,
            TransportCatalog::new(),
            CountryRanks::new(99),
            EngineConfig::default(),
        );

        let state = engine.compute_initial_route(&select(&["Pai", "Bangkok", "Chiang Mai"]), None);
        assert_eq!(state.order().last(), Some(&"Pai"));

        let segments = engine.estimate_segments(&state);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].distance_km, None);
        assert_eq!(segments[1].mode, TransportMode::Unknown);
    }

    #[test]
    fn catalog_segment_between_stops() {
        let engine = engine();
        let state = engine.compute_initial_route(&select(&["Bangkok", "Chiang Mai"]), None);
        let segments = engine.estimate_segments(&state);

        assert_eq!(segments.len(), 1);
        let flight = segments[0]
            .options
            .iter()
            .find(|o| o.mode == TransportMode::Flight)
            .unwrap();
        assert_eq!(flight.duration.exact(), Some(chrono::Duration::minutes(80)));
        assert_eq!(flight.stop_count, Some(0));
    }

    #[test]
    fn preferences_annotate_without_rerouting() {
        let engine = engine();
        let state = engine.compute_initial_route(&select(&["Chiang Mai", "Tokyo"]), None);
        let before = state.order().into_iter().map(String::from).collect::<Vec<_>>();

        let prefs = RoutePreferences {
            max_stops_per_flight: MaxStops::Nonstop,
            ..RoutePreferences::default()
        };
        let state = engine.set_preferences(state, prefs.clone());

        assert_eq!(state.preferences(), &prefs);
        assert_eq!(state.order(), before);
        let segments = engine.estimate_segments(&state);
        assert!(
            segments[0]
                .violations
                .contains(&PreferenceViolation::TooManyStops { stops: 1, max: 0 })
        );
    }

    #[test]
    fn home_legs_use_origin() {
        let engine = engine();
        let state = engine.compute_initial_route(&select(&["Bangkok", "Chiang Mai"]), Some("London"));
        let legs = engine.home_legs(&state);

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].from, "London");
        assert_eq!(legs[1].to, "London");
        assert_eq!(legs[0].mode, TransportMode::Flight);

        let no_origin = engine.compute_initial_route(&select(&["Bangkok"]), None);
        assert!(engine.home_legs(&no_origin).is_empty());
    }

    #[test]
    fn invalid_country_order_is_ignored() {
        let engine = engine();
        let state = engine.compute_initial_route(&select(&["Bangkok", "Tokyo"]), None);
        let before = state.clone();

        let state = engine.set_country_order(state, &[Country::new("Japan")]);
        assert_eq!(state, before);

        let state = engine.set_country_order(
            state,
            &[Country::new("Japan"), Country::new("Thailand")],
        );
        assert_eq!(state.order(), vec!["Tokyo", "Bangkok"]);

        let state = engine.resequence_countries(state);
        assert_eq!(state.order(), vec!["Bangkok", "Tokyo"]);
    }

    #[test]
    fn distance_estimates_never_claim_exact_duration() {
        let engine = engine();
        let state = engine.compute_initial_route(&select(&["Penang", "Bali"]), None);
        for segment in engine.estimate_segments(&state) {
            assert!(!matches!(segment.duration, DurationEstimate::Exact(_)));
        }
    }
}
