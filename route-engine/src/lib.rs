//! Multi-city route planning and transport estimation.
//!
//! Given the cities a traveler wants to visit, the engine groups them by
//! country, orders countries by distance from home and cities by nearest
//! neighbour, supports interactive editing, flags backtracking, and
//! estimates the transport between consecutive stops.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod enrich;
pub mod geography;
pub mod route;
pub mod sequencer;
pub mod store;
pub mod transport;

pub use engine::RouteEngine;
