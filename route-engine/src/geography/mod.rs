//! Geography: city coordinates, country classification and distances.
//!
//! The registry is plain data built once and injected into the engine, so
//! tests can run against synthetic geography.

mod distance;
mod registry;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use registry::{Geography, GeographyBuilder, default_geography};
