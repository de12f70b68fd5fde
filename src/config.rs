use crate::error::RouteError;
use crate::geopoint::LngLat;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAP_STYLE: &str = "https://basemaps.cartocdn.com/gl/voyager-gl-style/style.json";

pub const SERVER_URL_ENV: &str = "SKATE_ROUTE_SERVER_URL";
pub const TIMEOUT_ENV: &str = "SKATE_ROUTE_TIMEOUT_SECS";

/// Initial view of the map before the user's location is known, and the view used once
/// it is.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDefaults {
    pub style_url: String,
    pub center: LngLat,
    pub zoom: f64,
    /// Zoom used when flying to the user's location.
    pub located_zoom: f64,
    pub fly_duration_ms: u64,
}

impl Default for MapDefaults {
    fn default() -> Self {
        MapDefaults {
            style_url: DEFAULT_MAP_STYLE.to_string(),
            center: LngLat(-74.5, 40.0),
            zoom: 12.0,
            located_zoom: 15.0,
            fly_duration_ms: 1000,
        }
    }
}

/// Settings for talking to the routing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the routing backend, e.g. `http://localhost:8000`.
    pub server_url: String,
    pub request_timeout: Duration,
    pub map: MapDefaults,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            map: MapDefaults::default(),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from `SKATE_ROUTE_SERVER_URL` and `SKATE_ROUTE_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables.
    ///
    /// # Returns
    /// A `Result` containing the configuration, or `RouteError::InvalidInput` if the
    /// timeout is not a positive whole number of seconds.
    pub fn from_env() -> Result<Self, RouteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, RouteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(url) = lookup(SERVER_URL_ENV).filter(|s| !s.trim().is_empty()) {
            config.server_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                RouteError::InvalidInput(format!("{} must be a whole number, got '{}'", TIMEOUT_ENV, raw))
            })?;
            if secs == 0 {
                return Err(RouteError::InvalidInput(format!(
                    "{} must be greater than zero",
                    TIMEOUT_ENV
                )));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        log::debug!(
            "Client config: server_url={}, timeout={:?}",
            config.server_url,
            config.request_timeout
        );
        Ok(config)
    }
}
