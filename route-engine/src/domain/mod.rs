//! Domain types for the route planning engine.
//!
//! Types that carry invariants validate them at construction time, so code
//! that receives them can trust their validity.

mod city;
mod coordinates;
mod country;
mod preferences;
mod segment;
mod trip_id;

pub use city::SelectedCity;
pub use coordinates::{Coordinates, InvalidCoordinates};
pub use country::{Country, UNKNOWN_COUNTRY};
pub use preferences::{MaxStops, RoutePreferences};
pub use segment::{
    Badge, DurationEstimate, EstimateSource, PreferenceViolation, TransportMode, TransportOption,
    TransportSegment,
};
pub use trip_id::{InvalidTripId, TripId};
