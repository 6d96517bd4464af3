//! Transport estimation.
//!
//! Annotates each pair of consecutive stops with a mode, distance, duration
//! and stop count. Curated catalog data is preferred; distance-based
//! estimates fill the gaps.

mod estimator;
mod rank;

pub use estimator::TransportEstimator;
pub use rank::{rank_options, score};
