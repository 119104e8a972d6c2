//! Geodesic distance between two points on the WGS-84 ellipsoid.

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Construction does not check ranges; callers validate with
/// [`Coordinates::is_valid`] before resolving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when latitude is in [-90, 90] and longitude in [-180, 180].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    fn to_point(self) -> Point<f64> {
        // geo points are (x, y) = (longitude, latitude)
        Point::new(self.longitude, self.latitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Distance in kilometers along the WGS-84 geodesic (Karney's algorithm).
#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    Geodesic::distance(from.to_point(), to.to_point()) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE_KM: f64 = 0.01;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinates::new(51.5074, -0.1278);
        assert!(distance_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_on_equator() {
        // Equatorial radius * pi / 180
        let d = distance_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - 111.319_491).abs() < TOLERANCE_KM, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude_from_equator() {
        let d = distance_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
        assert!((d - 110.574_389).abs() < TOLERANCE_KM, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(40.7128, -74.0060);
        let b = Coordinates::new(40.7306, -73.9352);
        let ab = distance_km(a, b);
        let ba = distance_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab > 5.0 && ab < 7.0, "got {ab}");
    }

    #[test]
    fn validity_bounds_are_inclusive() {
        assert!(Coordinates::new(90.0, 180.0).is_valid());
        assert!(Coordinates::new(-90.0, -180.0).is_valid());
        assert!(!Coordinates::new(90.1, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn display_is_comma_separated() {
        assert_eq!(Coordinates::new(51.5, -0.25).to_string(), "51.5,-0.25");
    }
}
