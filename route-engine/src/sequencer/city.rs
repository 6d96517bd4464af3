//! Nearest-neighbour ordering of cities within one country.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Coordinates, Country};
use crate::geography::{Geography, haversine_km};

/// Costs closer than this (km) are treated as equal.
const COST_EPSILON_KM: f64 = 1e-9;

/// Major hubs that should open a country's tour when present.
///
/// Hubs are listed in priority order per country.
#[derive(Debug, Clone, Default)]
pub struct HubSeeds {
    seeds: HashMap<Country, Vec<String>>,
}

impl HubSeeds {
    /// Create an empty table (no overrides).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hubs for a country, builder style.
    pub fn with(mut self, country: &str, hubs: &[&str]) -> Self {
        self.seeds.insert(
            Country::new(country),
            hubs.iter().map(|h| h.to_string()).collect(),
        );
        self
    }

    fn hubs(&self, country: &Country) -> &[String] {
        self.seeds.get(country).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Greedy nearest-neighbour sequencer for the cities of one country.
pub struct CitySequencer<'a> {
    geography: &'a Geography,
    hub_seeds: &'a HubSeeds,
}

impl<'a> CitySequencer<'a> {
    /// Create a new sequencer.
    pub fn new(geography: &'a Geography, hub_seeds: &'a HubSeeds) -> Self {
        Self {
            geography,
            hub_seeds,
        }
    }

    /// Order the cities of one country.
    ///
    /// Returns a permutation of indices into `cities`. Cities without
    /// coordinates come last, in input order. When a configured hub is
    /// present it seeds the tour; otherwise every city is tried as a seed
    /// and the shortest tour wins, ties going to the earliest seed.
    pub fn sequence(&self, country: &Country, cities: &[&str]) -> Vec<usize> {
        let coords: Vec<Option<Coordinates>> = cities
            .iter()
            .map(|c| self.geography.coordinates_of(c))
            .collect();

        let (known, unknown): (Vec<usize>, Vec<usize>) =
            (0..cities.len()).partition(|&i| coords[i].is_some());

        if known.len() <= 1 {
            return known.into_iter().chain(unknown).collect();
        }

        let seeds = match self.hub_seed(country, cities, &known) {
            Some(hub) => vec![hub],
            None => known.clone(),
        };

        let mut best: Option<(f64, Vec<usize>)> = None;
        for seed in seeds {
            let tour = nearest_neighbour(seed, &known, &coords);
            let cost = tour_cost(&tour, &coords);
            trace!(
                country = %country,
                seed = %cities[seed],
                cost,
                "Candidate tour"
            );
            match &best {
                Some((best_cost, _)) if cost >= best_cost - COST_EPSILON_KM => {}
                _ => best = Some((cost, tour)),
            }
        }

        best.map(|(_, tour)| tour)
            .unwrap_or(known)
            .into_iter()
            .chain(unknown)
            .collect()
    }

    /// First configured hub present in the group, by hub priority.
    fn hub_seed(&self, country: &Country, cities: &[&str], known: &[usize]) -> Option<usize> {
        self.hub_seeds.hubs(country).iter().find_map(|hub| {
            known
                .iter()
                .copied()
                .find(|&i| cities[i].eq_ignore_ascii_case(hub))
        })
    }
}

/// Build a tour from `seed`, always moving to the closest unvisited city.
///
/// Ties go to the city that appears first in `known`.
fn nearest_neighbour(seed: usize, known: &[usize], coords: &[Option<Coordinates>]) -> Vec<usize> {
    let mut remaining: Vec<usize> = known.iter().copied().filter(|&i| i != seed).collect();
    let mut tour = Vec::with_capacity(known.len());
    tour.push(seed);

    while !remaining.is_empty() {
        let last = tour[tour.len() - 1];
        let mut best_pos = 0;
        let mut best_dist = f64::INFINITY;
        for (pos, &candidate) in remaining.iter().enumerate() {
            let dist = distance(coords, last, candidate);
            if dist < best_dist {
                best_dist = dist;
                best_pos = pos;
            }
        }
        tour.push(remaining.remove(best_pos));
    }

    tour
}

fn tour_cost(tour: &[usize], coords: &[Option<Coordinates>]) -> f64 {
    tour.windows(2).map(|w| distance(coords, w[0], w[1])).sum()
}

fn distance(coords: &[Option<Coordinates>], a: usize, b: usize) -> f64 {
    match (coords[a], coords[b]) {
        (Some(from), Some(to)) => haversine_km(from, to),
        _ => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geography::{GeographyBuilder, default_geography};

    fn names<'a>(cities: &[&'a str], order: &[usize]) -> Vec<&'a str> {
        order.iter().map(|&i| cities[i]).collect()
    }

    #[test]
    fn thailand_triangle_puts_bangkok_in_the_middle() {
        let geo = default_geography();
        let hubs = HubSeeds::new();
        let sequencer = CitySequencer::new(&geo, &hubs);

        let cities = ["Bangkok", "Chiang Mai", "Phuket"];
        let order = sequencer.sequence(&Country::new("Thailand"), &cities);

        assert_eq!(names(&cities, &order), ["Chiang Mai", "Bangkok", "Phuket"]);
    }

    #[test]
    fn unknown_coordinates_go_last() {
        let geo = GeographyBuilder::new()
            .city("Bangkok", "Thailand", 13.7563, 100.5018)
            .city("Chiang Mai", "Thailand", 18.7883, 98.9853)
            .city("Phuket", "Thailand", 7.8804, 98.3923)
            .build();
        let hubs = HubSeeds::new();
        let sequencer = CitySequencer::new(&geo, &hubs);

        let cities = ["Pai", "Bangkok", "Chiang Mai", "Phuket"];
        let order = sequencer.sequence(&Country::new("Thailand"), &cities);

        assert_eq!(order.len(), 4);
        assert_eq!(cities[*order.last().unwrap()], "Pai");
    }

    #[test]
    fn all_unknown_keeps_input_order() {
        let geo = Geography::new();
        let hubs = HubSeeds::new();
        let sequencer = CitySequencer::new(&geo, &hubs);

        let order = sequencer.sequence(&Country::unknown(), &["X", "Y", "Z"]);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn empty_and_single() {
        let geo = default_geography();
        let hubs = HubSeeds::new();
        let sequencer = CitySequencer::new(&geo, &hubs);

        assert!(sequencer.sequence(&Country::new("Japan"), &[]).is_empty());
        assert_eq!(sequencer.sequence(&Country::new("Japan"), &["Tokyo"]), vec![0]);
    }

    #[test]
    fn hub_seed_opens_the_tour() {
        let geo = default_geography();
        let hubs = HubSeeds::new().with("Thailand", &["Bangkok"]);
        let sequencer = CitySequencer::new(&geo, &hubs);

        let cities = ["Phuket", "Chiang Mai", "Bangkok"];
        let order = sequencer.sequence(&Country::new("Thailand"), &cities);

        assert_eq!(names(&cities, &order), ["Bangkok", "Chiang Mai", "Phuket"]);
    }

    #[test]
    fn line_of_cities_is_walked_end_to_end() {
        let geo = GeographyBuilder::new()
            .city("A", "Testland", 0.0, 0.0)
            .city("B", "Testland", 0.0, 1.0)
            .city("C", "Testland", 0.0, 2.0)
            .city("D", "Testland", 0.0, 3.0)
            .build();
        let hubs = HubSeeds::new();
        let sequencer = CitySequencer::new(&geo, &hubs);

        let cities = ["C", "A", "D", "B"];
        let order = sequencer.sequence(&Country::new("Testland"), &cities);
        let visited = names(&cities, &order);

        assert!(
            visited == ["A", "B", "C", "D"] || visited == ["D", "C", "B", "A"],
            "got {visited:?}"
        );
    }
}
