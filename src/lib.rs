pub mod client;
pub mod config;
pub mod distance;
pub mod error;
pub mod geopoint;
pub mod map;
pub mod reconcile;
pub mod requests;
pub mod selection;
pub mod session;
pub mod summary;

pub use client::RouteClient;
pub use config::{ClientConfig, MapDefaults};
pub use distance::{haversine_km, planar_distance, MAX_END_DISTANCE_KM};
pub use error::RouteError;
pub use geopoint::{GeoPoint, LngLat};
pub use map::{GeolocationError, MapWidget, MarkerColor, RouteUi};
pub use reconcile::{reconcile, LngLatBounds, ReconciledRoute};
pub use requests::{RouteRequest, RouteResponse};
pub use selection::{ClickTarget, Endpoint, Selection};
pub use session::RouteSession;
pub use summary::RouteSummary;
