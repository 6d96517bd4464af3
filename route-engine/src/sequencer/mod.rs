//! Route sequencing heuristics.
//!
//! Countries are ordered by a fixed distance-from-home table; cities within
//! a country are ordered by greedy nearest neighbour. Neither attempts an
//! optimal tour.

mod city;
mod country;

pub use city::{CitySequencer, HubSeeds};
pub use country::{CountryRanks, default_ranks};
