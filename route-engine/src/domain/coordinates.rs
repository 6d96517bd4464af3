//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinates {
    lat: f64,
    lng: f64,
    reason: &'static str,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
///
/// # Examples
///
/// ```
/// use route_engine::domain::Coordinates;
///
/// let bangkok = Coordinates::new(13.7563, 100.5018).unwrap();
/// assert_eq!(bangkok.lat(), 13.7563);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Validate and construct a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({}, {})", self.lat, self.lng)
    }
}
