//! Distances used by the selection gate and the route reconciler.
//!
//! [`haversine_km`] is the great-circle distance used to cap how far the end point may
//! be from the start. [`planar_distance`] is a flat Euclidean distance in degree units,
//! only meaningful for the tiny offsets the reconciler compares.

use crate::error::RouteError;
use crate::geopoint::{GeoPoint, LngLat};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Farthest an end point may be from the start point.
pub const MAX_END_DISTANCE_KM: f64 = 3.0;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin() * (d_lng / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Euclidean distance between two widget coordinates, in degrees.
pub fn planar_distance(a: LngLat, b: LngLat) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Checks a candidate end point against the start point.
///
/// Returns the distance in kilometers when it is within [`MAX_END_DISTANCE_KM`].
pub fn check_end_distance(start: &GeoPoint, candidate: &GeoPoint) -> Result<f64, RouteError> {
    let distance_km = haversine_km(start, candidate);
    if distance_km > MAX_END_DISTANCE_KM {
        return Err(RouteError::EndTooFar { distance_km });
    }
    Ok(distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn haversine_distance_in_kilometers() {
        let start = GeoPoint::new(38.898556, -77.037852);
        let end = GeoPoint::new(38.897147, -77.043934);
        assert_relative_eq!(haversine_km(&start, &end), 0.549_63, epsilon = 1e-4);
    }

    #[test]
    fn haversine_is_zero_for_same_point_and_symmetric() {
        let a = GeoPoint::new(40.0, -74.5);
        let b = GeoPoint::new(40.01, -74.49);
        assert_eq!(haversine_km(&a, &a), 0.0);
        assert_relative_eq!(haversine_km(&a, &b), haversine_km(&b, &a), epsilon = 1e-12);
    }

    #[test]
    fn end_within_cap_is_accepted() {
        let start = GeoPoint::new(0.0, 0.0);
        let distance = check_end_distance(&start, &GeoPoint::new(0.0, 0.02)).unwrap();
        assert_relative_eq!(distance, 2.2239, epsilon = 1e-3);
        assert_eq!(check_end_distance(&start, &start).unwrap(), 0.0);
    }

    #[test]
    fn end_beyond_cap_is_rejected() {
        let start = GeoPoint::new(0.0, 0.0);
        match check_end_distance(&start, &GeoPoint::new(0.0, 0.05)) {
            Err(RouteError::EndTooFar { distance_km }) => {
                assert_eq!(format!("{:.2}", distance_km), "5.56")
            }
            other => panic!("Expected EndTooFar, got {:?}", other),
        }
    }

    #[test]
    fn planar_distance_is_euclidean_in_degrees() {
        assert_relative_eq!(planar_distance(LngLat(0.0, 0.0), LngLat(3.0, 4.0)), 5.0);
        assert_eq!(planar_distance(LngLat(1.0, 1.0), LngLat(1.0, 1.0)), 0.0);
    }
}
