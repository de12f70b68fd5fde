// src/reconcile.rs

use crate::distance::planar_distance;
use crate::geopoint::{GeoPoint, LngLat};
use crate::map::{MapWidget, RouteLineStyle};
use geojson::{Feature, Geometry, Value};

/// Planar distance (degrees) above which a route endpoint counts as detached from the
/// selected point. Roughly ten meters at mid latitudes.
pub const ENDPOINT_TOLERANCE: f64 = 0.0001;

pub const ROUTE_SOURCE_ID: &str = "route";
pub const ROUTE_LAYER_ID: &str = "route-line";
pub const FIT_PADDING: f64 = 50.0;

/// Axis-aligned box around a set of widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLatBounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl LngLatBounds {
    /// A degenerate box around a single coordinate.
    pub fn from_point(coord: LngLat) -> Self {
        LngLatBounds {
            south_west: coord,
            north_east: coord,
        }
    }

    pub fn extend(mut self, coord: LngLat) -> Self {
        self.south_west = LngLat(self.south_west.0.min(coord.0), self.south_west.1.min(coord.1));
        self.north_east = LngLat(self.north_east.0.max(coord.0), self.north_east.1.max(coord.1));
        self
    }
}

/// A backend route whose ends are attached to the selected start and end points.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledRoute {
    coordinates: Vec<LngLat>,
    prepended_start: bool,
    appended_end: bool,
}

impl ReconciledRoute {
    pub fn coordinates(&self) -> &[LngLat] {
        &self.coordinates
    }

    pub fn into_coordinates(self) -> Vec<LngLat> {
        self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn prepended_start(&self) -> bool {
        self.prepended_start
    }

    pub fn appended_end(&self) -> bool {
        self.appended_end
    }

    /// Bounds of every coordinate, folded from the first one.
    pub fn bounds(&self) -> LngLatBounds {
        let first = self.coordinates[0];
        self.coordinates
            .iter()
            .fold(LngLatBounds::from_point(first), |bounds, coord| bounds.extend(*coord))
    }

    /// The route as a GeoJSON `LineString` feature.
    pub fn to_feature(&self) -> Feature {
        let line = self
            .coordinates
            .iter()
            .map(|coord| vec![coord.0, coord.1])
            .collect();
        Feature::from(Geometry::new(Value::LineString(line)))
    }
}

/// Attaches a backend route to the selected endpoints.
///
/// `geometry` is the backend's `[lat, lng]` polyline. The result is in widget
/// `[lng, lat]` order, starts at `start` unless the first route point is already within
/// [`ENDPOINT_TOLERANCE`] of it, and likewise ends at `end`. Returns `None` for an empty
/// geometry.
pub fn reconcile(geometry: &[[f64; 2]], start: GeoPoint, end: GeoPoint) -> Option<ReconciledRoute> {
    if geometry.is_empty() {
        return None;
    }

    let actual_start = start.to_lng_lat();
    let actual_end = end.to_lng_lat();

    let mut coordinates = Vec::with_capacity(geometry.len() + 2);
    let first = LngLat::from_lat_lng_pair(geometry[0]);
    let prepended_start = planar_distance(first, actual_start) > ENDPOINT_TOLERANCE;
    if prepended_start {
        coordinates.push(actual_start);
        log::debug!("Added start point to route");
    }
    coordinates.extend(geometry.iter().copied().map(LngLat::from_lat_lng_pair));

    let last = LngLat::from_lat_lng_pair(geometry[geometry.len() - 1]);
    let appended_end = planar_distance(last, actual_end) > ENDPOINT_TOLERANCE;
    if appended_end {
        coordinates.push(actual_end);
        log::debug!("Added end point to route");
    }

    log::debug!(
        "Route has {} points (including start/end)",
        coordinates.len()
    );

    Some(ReconciledRoute {
        coordinates,
        prepended_start,
        appended_end,
    })
}

/// Draws a reconciled route and fits the viewport around it.
///
/// The route source and its line layer are created on first use; later routes only
/// replace the source data.
pub fn render_route<M: MapWidget>(map: &mut M, route: &ReconciledRoute) {
    let feature = route.to_feature();
    if map.has_source(ROUTE_SOURCE_ID) {
        map.set_source_data(ROUTE_SOURCE_ID, feature);
    } else {
        map.add_line_source(ROUTE_SOURCE_ID, feature);
        map.add_line_layer(ROUTE_LAYER_ID, ROUTE_SOURCE_ID, &RouteLineStyle::default());
    }
    map.fit_bounds(route.bounds(), FIT_PADDING);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> GeoPoint {
        GeoPoint::new(40.0, -74.5)
    }

    fn end() -> GeoPoint {
        GeoPoint::new(40.01, -74.49)
    }

    #[test]
    fn attached_route_is_only_reordered() {
        let geometry = [[40.0, -74.5], [40.005, -74.495], [40.01, -74.49]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        assert_eq!(
            route.coordinates(),
            &[LngLat(-74.5, 40.0), LngLat(-74.495, 40.005), LngLat(-74.49, 40.01)]
        );
        assert!(!route.prepended_start());
        assert!(!route.appended_end());
    }

    #[test]
    fn points_within_tolerance_are_not_duplicated() {
        let geometry = [[40.00005, -74.50005], [40.01005, -74.48995]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn detached_start_is_prepended() {
        let geometry = [[40.001, -74.499], [40.01, -74.49]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route.coordinates()[0], start().to_lng_lat());
        assert_eq!(route.coordinates()[1], LngLat(-74.499, 40.001));
        assert!(route.prepended_start());
        assert!(!route.appended_end());
    }

    #[test]
    fn detached_ends_grow_route_by_two() {
        let geometry = [[40.002, -74.498], [40.005, -74.495], [40.008, -74.492]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        assert_eq!(route.len(), geometry.len() + 2);
        assert_eq!(route.coordinates().first(), Some(&start().to_lng_lat()));
        assert_eq!(route.coordinates().last(), Some(&end().to_lng_lat()));
    }

    #[test]
    fn single_point_route_gets_both_ends() {
        let geometry = [[40.005, -74.495]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        assert_eq!(
            route.into_coordinates(),
            vec![start().to_lng_lat(), LngLat(-74.495, 40.005), end().to_lng_lat()]
        );
    }

    #[test]
    fn empty_geometry_is_not_reconciled() {
        assert!(reconcile(&[], start(), end()).is_none());
    }

    #[test]
    fn bounds_cover_every_point() {
        let geometry = [[40.02, -74.51], [39.99, -74.48]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        let bounds = route.bounds();
        assert_eq!(bounds.south_west, LngLat(-74.51, 39.99));
        assert_eq!(bounds.north_east, LngLat(-74.48, 40.02));
    }

    #[test]
    fn feature_is_a_lng_lat_line_string() {
        let geometry = [[40.0, -74.5], [40.01, -74.49]];
        let route = reconcile(&geometry, start(), end()).unwrap();
        let value = serde_json::to_value(route.to_feature()).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "LineString");
        assert_eq!(
            value["geometry"]["coordinates"],
            serde_json::json!([[-74.5, 40.0], [-74.49, 40.01]])
        );
    }
}
