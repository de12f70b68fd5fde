// src/session.rs

use crate::client::RouteClient;
use crate::config::{ClientConfig, MapDefaults};
use crate::error::RouteError;
use crate::geopoint::GeoPoint;
use crate::map::{GeolocationResult, MapWidget, MarkerColor, RouteUi};
use crate::reconcile::{reconcile, render_route};
use crate::selection::{ClickTarget, Endpoint, Selection};
use crate::summary::RouteSummary;

pub const SELECT_PLACEHOLDER: &str = "Click on map to select...";
pub const TRIGGER_IDLE_LABEL: &str = "Calculate";
pub const TRIGGER_BUSY_LABEL: &str = "Calculating...";
pub const ROUTE_FAILED_MESSAGE: &str = "Error calculating route. Make sure the backend is running!";

/// One user's route picking session on a map.
///
/// `RouteSession` owns the endpoint selection together with the map widget and the page
/// controls it draws on. The host forwards its events to the `on_*` handlers one at a
/// time and calls [`RouteSession::calculate`] when the trigger is pressed.
///
/// # Example
///
/// ```rust,ignore
/// let mut session = RouteSession::new(map, ui, ClientConfig::default())?;
/// session.on_map_click(GeoPoint::new(40.0, -74.5))?;   // start
/// session.on_map_click(GeoPoint::new(40.01, -74.49))?; // end
/// let summary = session.calculate().await?;
/// ```
pub struct RouteSession<M: MapWidget, U: RouteUi> {
    map: M,
    ui: U,
    client: RouteClient,
    map_defaults: MapDefaults,
    selection: Selection<M::Marker>,
    target: ClickTarget,
}

impl<M: MapWidget, U: RouteUi> RouteSession<M, U> {
    /// Creates a session with a client built from `config`.
    pub fn new(map: M, ui: U, config: ClientConfig) -> Result<Self, RouteError> {
        let client = RouteClient::from_config(&config)?;
        Ok(Self::with_client(map, ui, client, config.map))
    }

    pub fn with_client(map: M, ui: U, client: RouteClient, map_defaults: MapDefaults) -> Self {
        RouteSession {
            map,
            ui,
            client,
            map_defaults,
            selection: Selection::NoSelection,
            target: ClickTarget::Start,
        }
    }

    pub fn selection(&self) -> &Selection<M::Marker> {
        &self.selection
    }

    pub fn target(&self) -> ClickTarget {
        self.target
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn into_parts(self) -> (M, U) {
        (self.map, self.ui)
    }

    /// Style, centre and zoom the host should create the map widget with.
    pub fn initial_view(&self) -> &MapDefaults {
        &self.map_defaults
    }

    pub fn on_map_load(&mut self) {
        log::info!(
            "Map loaded: style={}, center={:?}, zoom={}",
            self.map_defaults.style_url,
            self.map_defaults.center,
            self.map_defaults.zoom
        );
    }

    /// Seeds the start point from the user's location.
    ///
    /// Failures are only logged; the selection is left as it is.
    pub fn on_geolocation(&mut self, located: GeolocationResult) {
        match located {
            Ok(point) => {
                self.map.fly_to(
                    point.to_lng_lat(),
                    self.map_defaults.located_zoom,
                    self.map_defaults.fly_duration_ms,
                );
                self.place_start(point);
                self.target = ClickTarget::End;
                log::info!("Located at: {}, {}", point.lat, point.lng);
            }
            Err(e) => log::warn!("Geolocation error: {}", e),
        }
    }

    pub fn on_start_focus(&mut self) {
        self.target = ClickTarget::Start;
        self.ui.set_start_placeholder(SELECT_PLACEHOLDER);
    }

    pub fn on_end_focus(&mut self) {
        self.target = ClickTarget::End;
        self.ui.set_end_placeholder(SELECT_PLACEHOLDER);
    }

    /// Sets the start or end point, depending on the current click target.
    ///
    /// A rejected end point is reported through [`RouteUi::notify`] and returned as the
    /// error; the selection is unchanged in that case.
    pub fn on_map_click(&mut self, point: GeoPoint) -> Result<(), RouteError> {
        match self.target {
            ClickTarget::Start => {
                self.place_start(point);
                self.target = ClickTarget::End;
                log::info!("Start set: {}, {}", point.lat, point.lng);
                Ok(())
            }
            ClickTarget::End => {
                let distance_km = match self.selection.admit_end(&point) {
                    Ok(d) => d,
                    Err(e) => {
                        log::info!("End point rejected: {}", e);
                        self.ui.notify(&e.to_string());
                        return Err(e);
                    }
                };
                self.place_end(point);
                log::info!(
                    "End set: {}, {} Distance: {:.2}km",
                    point.lat,
                    point.lng,
                    distance_km
                );
                Ok(())
            }
        }
    }

    /// Shows the wrapped pointer position in the coordinates readout.
    pub fn on_pointer_move(&mut self, point: GeoPoint) {
        let wrapped = point.wrap();
        let text = format!(
            "Coordinates: {{\"lng\":{},\"lat\":{}}}",
            wrapped.lng, wrapped.lat
        );
        self.ui.show_coordinates(&text);
    }

    /// Requests a route for the current selection, draws it and shows its summary.
    ///
    /// The trigger is disabled while the request is outstanding and re-enabled on every
    /// exit path. Errors are logged and reported through [`RouteUi::notify`] before being
    /// returned. Returns `Ok(None)` when the backend answers with an empty route.
    pub async fn calculate(&mut self) -> Result<Option<RouteSummary>, RouteError> {
        log::debug!("Calculate clicked");

        let Some((start, end)) = self.selection.endpoints() else {
            let err = RouteError::EndpointsMissing;
            self.ui.notify(&err.to_string());
            return Err(err);
        };

        let RouteSession { map, ui, client, .. } = self;
        let mut trigger = TriggerGuard::engage(ui);
        let outcome = fetch_and_render(client, map, &mut *trigger.ui, start, end).await;

        if let Err(e) = &outcome {
            log::error!("Error: {}", e);
            trigger.ui.notify(ROUTE_FAILED_MESSAGE);
        }
        drop(trigger);
        outcome
    }

    fn place_start(&mut self, point: GeoPoint) {
        let marker = self.map.add_marker(point.to_lng_lat(), MarkerColor::Green);
        let (next, displaced) = std::mem::take(&mut self.selection).with_start(Endpoint::new(point, marker));
        self.selection = next;
        if let Some(old) = displaced {
            self.map.remove_marker(old);
        }
        self.ui.set_start_text(&point.input_text());
    }

    fn place_end(&mut self, point: GeoPoint) {
        let marker = self.map.add_marker(point.to_lng_lat(), MarkerColor::Red);
        let (next, displaced) = std::mem::take(&mut self.selection).with_end(Endpoint::new(point, marker));
        self.selection = next;
        if let Some(old) = displaced {
            self.map.remove_marker(old);
        }
        self.ui.set_end_text(&point.input_text());
    }
}

/// Disables the trigger while alive and re-enables it when dropped, including when the
/// `calculate` future is dropped before the request completes.
struct TriggerGuard<'a, U: RouteUi> {
    ui: &'a mut U,
}

impl<'a, U: RouteUi> TriggerGuard<'a, U> {
    fn engage(ui: &'a mut U) -> Self {
        ui.set_trigger(false, TRIGGER_BUSY_LABEL);
        TriggerGuard { ui }
    }
}

impl<U: RouteUi> Drop for TriggerGuard<'_, U> {
    fn drop(&mut self) {
        self.ui.set_trigger(true, TRIGGER_IDLE_LABEL);
    }
}

async fn fetch_and_render<M: MapWidget, U: RouteUi>(
    client: &RouteClient,
    map: &mut M,
    ui: &mut U,
    start: GeoPoint,
    end: GeoPoint,
) -> Result<Option<RouteSummary>, RouteError> {
    let response = client.calculate_route(start, end).await?;
    log::debug!("Route data: {:?}", response);

    let Some(route) = reconcile(&response.geometry, start, end) else {
        log::warn!("Backend returned an empty route");
        return Ok(None);
    };
    render_route(map, &route);

    let summary = RouteSummary::from(&response);
    ui.show_summary(&summary);
    Ok(Some(summary))
}
