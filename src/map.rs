// src/map.rs
//
// Seams to the host: the map widget, the page controls and the location service.

use crate::geopoint::{GeoPoint, LngLat};
use crate::reconcile::LngLatBounds;
use crate::summary::RouteSummary;
use geojson::Feature;
use thiserror::Error;

/// Marker colours used for the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    /// Start marker.
    Green,
    /// End marker.
    Red,
}

/// Paint and layout of the route line layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLineStyle {
    pub line_join: &'static str,
    pub line_cap: &'static str,
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

impl Default for RouteLineStyle {
    fn default() -> Self {
        RouteLineStyle {
            line_join: "round",
            line_cap: "round",
            color: "#007bff",
            width: 4.0,
            opacity: 0.8,
        }
    }
}

/// The map widget the session draws on.
///
/// Implementations wrap whatever rendering library the host uses. Marker handles are
/// opaque to this crate; they are only handed back to `remove_marker`.
pub trait MapWidget {
    type Marker;

    fn add_marker(&mut self, at: LngLat, color: MarkerColor) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn fly_to(&mut self, center: LngLat, zoom: f64, duration_ms: u64);

    fn has_source(&self, source_id: &str) -> bool;

    /// Adds a GeoJSON source holding a single line feature.
    fn add_line_source(&mut self, source_id: &str, data: Feature);

    fn add_line_layer(&mut self, layer_id: &str, source_id: &str, style: &RouteLineStyle);

    /// Replaces the data of an existing source.
    fn set_source_data(&mut self, source_id: &str, data: Feature);

    fn fit_bounds(&mut self, bounds: LngLatBounds, padding: f64);
}

/// The page controls around the map: the two inputs, the trigger, the results area
/// and user notifications.
pub trait RouteUi {
    fn set_start_text(&mut self, text: &str);

    fn set_end_text(&mut self, text: &str);

    fn set_start_placeholder(&mut self, text: &str);

    fn set_end_placeholder(&mut self, text: &str);

    fn set_trigger(&mut self, enabled: bool, label: &str);

    fn show_summary(&mut self, summary: &RouteSummary);

    fn show_coordinates(&mut self, text: &str);

    /// Shows a blocking notification to the user.
    fn notify(&mut self, message: &str);
}

/// Why the location service could not provide a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation permission denied")]
    Denied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("Geolocation not supported")]
    Unsupported,
}

/// Outcome of a one-shot position request.
pub type GeolocationResult = Result<GeoPoint, GeolocationError>;
