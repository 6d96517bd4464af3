//! Backtracking detection.
//!
//! A stop B between A and C (all in one country) is a detour when the
//! direct A→C hop is much shorter than the A→B hop.

use crate::geography::Geography;

use super::state::RouteState;

/// Positions of middle stops that pull the route off the direct path.
///
/// A triple is skipped when any distance is unknown, when the stops span
/// more than one country, or when A and C are the same city (a deliberate
/// out-and-back stopover).
pub fn detour_positions(state: &RouteState, geography: &Geography, ratio: f64) -> Vec<usize> {
    state
        .entries()
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let (a, b, c) = (&w[0], &w[1], &w[2]);
            if a.country != b.country || b.country != c.country || a.city == c.city {
                return None;
            }

            let direct = geography.distance_km(&a.city, &c.city)?;
            let via = geography.distance_km(&a.city, &b.city)?;
            (direct < ratio * via).then_some(i + 1)
        })
        .collect()
}
