// src/geopoint.rs

use crate::error::RouteError;
use serde::{Deserialize, Serialize};

/// A geographical point in degrees, in the `{lat, lng}` shape the routing backend expects.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new `GeoPoint` without range checks.
    ///
    /// Points coming from the map widget or the backend are already in range.
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Creates a new `GeoPoint`, rejecting latitudes outside [-90, 90] and longitudes
    /// outside [-180, 180].
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, RouteError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RouteError::InvalidCoordinate(format!(
                "Latitude must be between -90 and 90 degrees, got {}",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(RouteError::InvalidCoordinate(format!(
                "Longitude must be between -180 and 180 degrees, got {}",
                lng
            )));
        }
        Ok(GeoPoint { lat, lng })
    }

    /// Builds a point from a backend `[lat, lng]` pair.
    pub fn from_lat_lng_pair(pair: [f64; 2]) -> Self {
        GeoPoint {
            lat: pair[0],
            lng: pair[1],
        }
    }

    /// The same point in the map widget's `[lng, lat]` order.
    pub fn to_lng_lat(self) -> LngLat {
        LngLat(self.lng, self.lat)
    }

    /// Returns the point with its longitude wrapped into (-180, 180].
    pub fn wrap(self) -> Self {
        let wrapped = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        let lng = if wrapped == -180.0 { 180.0 } else { wrapped };
        GeoPoint { lat: self.lat, lng }
    }

    /// Text for the start/end inputs: `"lat, lng"` with four decimals.
    pub fn input_text(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// A coordinate in the map widget's axis order, serialised as `[lng, lat]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LngLat(pub f64, pub f64);

impl LngLat {
    pub fn lng(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }

    /// Converts a backend `[lat, lng]` pair, swapping the axes.
    pub fn from_lat_lng_pair(pair: [f64; 2]) -> Self {
        LngLat(pair[1], pair[0])
    }
}

impl From<GeoPoint> for LngLat {
    fn from(point: GeoPoint) -> Self {
        point.to_lng_lat()
    }
}

impl From<LngLat> for GeoPoint {
    fn from(coord: LngLat) -> Self {
        GeoPoint::new(coord.1, coord.0)
    }
}
