//! Route editing operations.
//!
//! Every operation is total: bad indices are clamped or ignored, unknown
//! cities are ignored, and the state invariants hold afterwards.

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::domain::{Country, SelectedCity};
use crate::geography::Geography;
use crate::sequencer::{CitySequencer, CountryRanks, HubSeeds};

use super::inefficiency;
use super::state::{ParkedCity, RouteEntry, RouteState};

/// Applies edits to a [`RouteState`].
pub struct RouteEditor<'a> {
    geography: &'a Geography,
    ranks: &'a CountryRanks,
    hub_seeds: &'a HubSeeds,
    config: &'a EngineConfig,
}

impl<'a> RouteEditor<'a> {
    /// Create a new editor.
    pub fn new(
        geography: &'a Geography,
        ranks: &'a CountryRanks,
        hub_seeds: &'a HubSeeds,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            geography,
            ranks,
            hub_seeds,
            config,
        }
    }

    /// Replace the route with a fresh heuristic ordering of `selected`.
    ///
    /// Duplicate names are collapsed. Countries are ranked by distance from
    /// home and each country's cities are ordered by nearest neighbour.
    pub fn populate(&self, state: &mut RouteState, selected: &[SelectedCity], origin: Option<&str>) {
        state.entries.clear();
        state.parked.clear();
        state.country_order.clear();
        state.origin = origin
            .map(|o| self.canonical(o))
            .filter(|o| !o.is_empty());

        for city in selected {
            let name = self.canonical(&city.name);
            if name.is_empty() || state.contains(&name) {
                continue;
            }
            let country = self.geography.classify(&name, &city.tags);
            let entry = state.new_entry(name, country);
            state.entries.push(entry);
        }

        state.country_order = self
            .ranks
            .sequence(state.entries.iter().map(|e| &e.country));
        self.optimize(state);

        debug!(
            stops = state.entries.len(),
            countries = state.country_order.len(),
            "Computed initial route"
        );
    }

    /// Insert a city at `index`, clamped to the route length.
    ///
    /// The name may already be in the route, which creates a stopover. A
    /// parked city is taken off the shelf.
    pub fn insert(&self, state: &mut RouteState, city: &SelectedCity, index: usize) {
        let name = self.canonical(&city.name);
        if name.is_empty() {
            trace!("Ignoring insert of empty city name");
            return;
        }

        let country = state
            .known_country(&name)
            .unwrap_or_else(|| self.geography.classify(&name, &city.tags));

        state.parked.retain(|p| p.city != name);

        let index = clamp_insert(index, state.entries.len());
        let entry = state.new_entry(name, country);
        state.entries.insert(index, entry);
        state.sync_country_order();
    }

    /// Remove the occurrence at `index`.
    ///
    /// When it was the last occurrence of its city, the city is parked.
    /// Out-of-range indices are ignored.
    pub fn remove(&self, state: &mut RouteState, index: usize) {
        if index >= state.entries.len() {
            trace!(index, len = state.entries.len(), "Ignoring remove past end");
            return;
        }

        let RouteEntry { city, country, .. } = state.entries.remove(index);
        if !state.contains(&city) && !state.is_parked(&city) {
            state.parked.push(ParkedCity { city, country });
        }
        state.sync_country_order();
    }

    /// Move the entry at `from` so it ends up at `to`.
    ///
    /// `to` is clamped; an out-of-range `from` is ignored.
    pub fn move_entry(&self, state: &mut RouteState, from: usize, to: usize) {
        if from >= state.entries.len() {
            trace!(from, len = state.entries.len(), "Ignoring move from past end");
            return;
        }

        let entry = state.entries.remove(from);
        let to = clamp_insert(to, state.entries.len());
        state.entries.insert(to, entry);
        state.sync_country_order();
    }

    /// Take every occurrence of `city` off the route and park it.
    pub fn park(&self, state: &mut RouteState, city: &str) {
        let city = self.canonical(city);
        let city = city.as_str();
        let Some(country) = state
            .entries
            .iter()
            .find(|e| e.city == city)
            .map(|e| e.country.clone())
        else {
            trace!(city, "Ignoring park of city not on the route");
            return;
        };

        state.entries.retain(|e| e.city != city);
        state.parked.push(ParkedCity {
            city: city.to_string(),
            country,
        });
        state.sync_country_order();
    }

    /// Put a parked city back after the last stop of its country.
    ///
    /// If its country has no stops the city goes at the end.
    pub fn unpark(&self, state: &mut RouteState, city: &str) {
        let city = self.canonical(city);
        let Some(pos) = state.parked.iter().position(|p| p.city == city) else {
            trace!(%city, "Ignoring unpark of city that is not parked");
            return;
        };

        let ParkedCity { city, country } = state.parked.remove(pos);
        let index = state
            .entries
            .iter()
            .rposition(|e| e.country == country)
            .map(|i| i + 1)
            .unwrap_or(state.entries.len());

        let entry = state.new_entry(city, country);
        state.entries.insert(index, entry);
        state.sync_country_order();
    }

    /// Regroup the route in a new country sequence.
    ///
    /// `new_order` must be a permutation of the current country order;
    /// anything else is ignored. Returns true if the order was applied.
    pub fn reorder_countries(&self, state: &mut RouteState, new_order: &[Country]) -> bool {
        if !is_permutation(&state.country_order, new_order) {
            trace!(?new_order, "Ignoring country order that is not a permutation");
            return false;
        }

        state.country_order = new_order.to_vec();
        regroup(state);
        true
    }

    /// Recompute the country order from the rank table and regroup.
    pub fn resequence_countries(&self, state: &mut RouteState) {
        let order = self.ranks.sequence(state.entries.iter().map(|e| &e.country));
        state.country_order = order;
        regroup(state);
    }

    /// Reorder cities within each country by nearest neighbour.
    ///
    /// Works on the current members of each country, in the current
    /// country order. Never adds, removes or reclassifies a stop. Each city
    /// is sequenced once; stopover copies keep their position in the group
    /// and are kept apart from other visits of the same city wherever the
    /// group has room.
    pub fn optimize(&self, state: &mut RouteState) {
        let sequencer = CitySequencer::new(self.geography, self.hub_seeds);
        let mut remaining = std::mem::take(&mut state.entries);
        let mut reordered = Vec::with_capacity(remaining.len());

        for country in &state.country_order {
            let (group, rest): (Vec<RouteEntry>, Vec<RouteEntry>) =
                remaining.into_iter().partition(|e| &e.country == country);
            remaining = rest;

            reordered.extend(sequence_group(&sequencer, country, group));
        }

        // Stops whose country is missing from the order keep their place at the end
        reordered.extend(remaining);
        state.entries = reordered;
        state.sync_country_order();

        debug!(stops = state.entries.len(), "Optimized route");
    }

    /// Returns true if some stop is a detour between its neighbours.
    pub fn detect_inefficiency(&self, state: &RouteState) -> bool {
        !self.inefficient_stops(state).is_empty()
    }

    /// Positions of stops that are detours between their neighbours.
    pub fn inefficient_stops(&self, state: &RouteState) -> Vec<usize> {
        inefficiency::detour_positions(state, self.geography, self.config.backtrack_ratio)
    }

    fn canonical(&self, name: &str) -> String {
        let trimmed = name.trim();
        self.geography
            .canonical_name(trimmed)
            .unwrap_or(trimmed)
            .to_string()
    }
}

/// Clamp an insertion index to `[0, len]`.
fn clamp_insert(index: usize, len: usize) -> usize {
    if index > len {
        trace!(index, len, "Clamping index");
    }
    index.min(len)
}

fn is_permutation(current: &[Country], proposed: &[Country]) -> bool {
    if current.len() != proposed.len() {
        return false;
    }
    let mut a = current.to_vec();
    let mut b = proposed.to_vec();
    a.sort();
    b.sort();
    a == b
}

/// Order one country's entries with the sequencer.
fn sequence_group(sequencer: &CitySequencer<'_>, country: &Country, group: Vec<RouteEntry>) -> Vec<RouteEntry> {
    let mut firsts: Vec<RouteEntry> = Vec::with_capacity(group.len());
    let mut copies: Vec<(usize, RouteEntry)> = Vec::new();
    for (i, entry) in group.into_iter().enumerate() {
        if firsts.iter().any(|e| e.city == entry.city) {
            copies.push((i, entry));
        } else {
            firsts.push(entry);
        }
    }

    let names: Vec<&str> = firsts.iter().map(|e| e.city.as_str()).collect();
    let order = sequencer.sequence(country, &names);
    let mut slots: Vec<Option<RouteEntry>> = firsts.into_iter().map(Some).collect();
    let mut sequenced: Vec<RouteEntry> = order.into_iter().filter_map(|i| slots[i].take()).collect();

    for (i, copy) in copies {
        let start = i.min(sequenced.len());
        let at = (start..=sequenced.len())
            .chain((0..start).rev())
            .find(|&at| !next_to_same_city(&sequenced, at, &copy.city))
            .unwrap_or(start);
        sequenced.insert(at, copy);
    }

    sequenced
}

/// Returns true if inserting `city` at `at` would put it beside itself.
fn next_to_same_city(entries: &[RouteEntry], at: usize, city: &str) -> bool {
    let before = at.checked_sub(1).and_then(|i| entries.get(i));
    let after = entries.get(at);
    [before, after].into_iter().flatten().any(|e| e.city == city)
}

/// Concatenate each country's entries, in relative order, following
/// `country_order`.
fn regroup(state: &mut RouteState) {
    let mut remaining = std::mem::take(&mut state.entries);
    let mut regrouped = Vec::with_capacity(remaining.len());

    for country in &state.country_order {
        let (group, rest): (Vec<RouteEntry>, Vec<RouteEntry>) =
            remaining.into_iter().partition(|e| &e.country == country);
        remaining = rest;
        regrouped.extend(group);
    }

    regrouped.extend(remaining);
    state.entries = regrouped;
    state.sync_country_order();
}
