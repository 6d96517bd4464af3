//! Great-circle distance between cities.

use crate::domain::Coordinates;

use super::registry::Geography;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.lat().to_radians();
    let lat2_rad = to.lat().to_radians();
    let delta_lat = (to.lat() - from.lat()).to_radians();
    let delta_lng = (to.lng() - from.lng()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

impl Geography {
    /// Distance between two named cities in kilometers.
    ///
    /// Returns `None` if either city has no coordinates.
    pub fn distance_km(&self, a: &str, b: &str) -> Option<f64> {
        let from = self.coordinates_of(a)?;
        let to = self.coordinates_of(b)?;
        Some(haversine_km(from, to))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinates() -> impl Strategy<Value = Coordinates> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinates::new(lat, lng).unwrap())
    }

    proptest! {
        /// Distance is symmetric
        #[test]
        fn symmetric(a in coordinates(), b in coordinates()) {
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            prop_assert!((ab - ba).abs() < 0.01, "{} vs {}", ab, ba);
        }

        /// Distance is never negative and never exceeds half the circumference
        #[test]
        fn bounded(a in coordinates(), b in coordinates()) {
            let d = haversine_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
