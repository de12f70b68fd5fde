// src/requests.rs
use crate::error::RouteError;
use crate::geopoint::GeoPoint;
use serde::{Deserialize, Serialize};

/// Body of a route calculation request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        RouteRequest { start, end }
    }
}

/// A calculated route as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// Route polyline as `[lat, lng]` pairs.
    pub geometry: Vec<[f64; 2]>,
    pub distance_km: f64,
    pub skate_time_min: f64,
}

/// Everything a successful HTTP exchange can carry.
///
/// The backend reports routing failures as `{"error": "..."}` with a success status.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub(crate) enum BackendReply {
    Route(RouteResponse),
    Failed { error: String },
}

impl BackendReply {
    pub(crate) fn into_result(self) -> Result<RouteResponse, RouteError> {
        match self {
            BackendReply::Route(route) => Ok(route),
            BackendReply::Failed { error } => Err(RouteError::Backend(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_nested_lat_lng() {
        let request = RouteRequest::new(GeoPoint::new(40.0, -74.5), GeoPoint::new(40.01, -74.49));
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "start": { "lat": 40.0, "lng": -74.5 },
                "end": { "lat": 40.01, "lng": -74.49 }
            })
        );
    }

    #[test]
    fn reply_decodes_route() {
        let body = json!({
            "geometry": [[40.0, -74.5], [40.01, -74.49]],
            "distance_km": 1.41,
            "skate_time_min": 6.2
        });
        let reply: BackendReply = serde_json::from_value(body).unwrap();
        let route = reply.into_result().unwrap();
        assert_eq!(route.geometry.len(), 2);
        assert_eq!(route.geometry[1], [40.01, -74.49]);
        assert_eq!(route.distance_km, 1.41);
    }

    #[test]
    fn reply_decodes_backend_error() {
        let reply: BackendReply =
            serde_json::from_value(json!({ "error": "No path between nodes" })).unwrap();
        match reply.into_result() {
            Err(RouteError::Backend(msg)) => assert_eq!(msg, "No path between nodes"),
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }
}
