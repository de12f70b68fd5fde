// src/client.rs

use crate::config::ClientConfig;
use crate::error::RouteError;
use crate::geopoint::GeoPoint;
use crate::requests::{BackendReply, RouteRequest, RouteResponse};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Path of the route calculation endpoint, relative to the server URL.
pub const ROUTE_ENDPOINT: &str = "main";

/// Client for the routing backend.
///
/// `RouteClient` holds the normalised base URL of the backend and an underlying
/// `reqwest::Client`. It makes one request per call and never retries.
///
/// # Example
///
/// ```rust,no_run
/// use skate_route::{GeoPoint, RouteClient};
/// # use skate_route::RouteError;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), RouteError> {
/// let client = RouteClient::new("localhost:8000")?;
/// let route = client
///     .calculate_route(GeoPoint::new(40.0, -74.5), GeoPoint::new(40.01, -74.49))
///     .await?;
/// println!("{} points, {:.2} km", route.geometry.len(), route.distance_km);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RouteClient {
    pub server_url: String,
    pub(crate) http_client: Client,
}

impl RouteClient {
    /// Creates a new `RouteClient` with reqwest's default settings.
    ///
    /// # Arguments
    ///
    /// * `server_url`: The base URL of the routing backend (e.g. `"http://localhost:8000"`).
    ///   A missing scheme is filled in with `http://` and trailing slashes are removed.
    ///
    /// # Returns
    ///
    /// A `Result` containing the new client, or a `RouteError` if the URL is invalid.
    pub fn new(server_url: &str) -> Result<Self, RouteError> {
        let http_client = Client::builder()
            .default_headers(Self::default_headers())
            .build()
            .map_err(RouteError::Http)?;
        Self::with_http_client(server_url, http_client)
    }

    /// Creates a new `RouteClient` from a [`ClientConfig`], applying its request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, RouteError> {
        let http_client = Client::builder()
            .default_headers(Self::default_headers())
            .timeout(config.request_timeout)
            .build()
            .map_err(RouteError::Http)?;
        Self::with_http_client(&config.server_url, http_client)
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn with_http_client(server_url: &str, http_client: Client) -> Result<Self, RouteError> {
        let mut temp_url_string = server_url.trim().to_string();

        // Ensure scheme is present
        if !temp_url_string.starts_with("http://") && !temp_url_string.starts_with("https://") {
            temp_url_string = format!("http://{}", temp_url_string);
        }

        let parsed_server_url = Url::parse(&temp_url_string)?;

        if parsed_server_url.cannot_be_a_base() || parsed_server_url.host_str().is_none() {
            return Err(RouteError::InvalidUrl(format!(
                "The server_url '{}' resolved to '{}', which cannot be a base URL. Please provide a full base URL (e.g., http://localhost:8000).",
                server_url, parsed_server_url
            )));
        }

        let final_server_url = parsed_server_url.as_str().trim_end_matches('/').to_string();

        log::debug!(
            "RouteClient initialized with base server_url: {}",
            final_server_url
        );

        Ok(Self {
            server_url: final_server_url,
            http_client,
        })
    }

    /// Asks the backend for a route between two points.
    ///
    /// Sends `POST {server_url}/main` with `{"start": {lat, lng}, "end": {lat, lng}}`.
    ///
    /// # Returns
    ///
    /// The decoded `RouteResponse`, or a `RouteError` when the request cannot be sent,
    /// the status is not 2xx, the body cannot be decoded, or the backend reports
    /// `{"error": ...}`.
    pub async fn calculate_route(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Result<RouteResponse, RouteError> {
        let body = RouteRequest::new(start, end);
        let reply: BackendReply = self._request(Method::POST, ROUTE_ENDPOINT, Some(&body)).await?;
        reply.into_result()
    }

    // Central request method
    pub(crate) async fn _request<T: Serialize + Send + Sync, R: DeserializeOwned + Send + 'static>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&T>,
    ) -> Result<R, RouteError> {
        let base_url = Url::parse(&format!("{}/", self.server_url)).map_err(|e| {
            RouteError::InvalidUrl(format!(
                "Base server URL '{}' is invalid: {}",
                self.server_url, e
            ))
        })?;

        let full_url = base_url.join(endpoint.trim_start_matches('/')).map_err(|e| {
            RouteError::InvalidUrl(format!(
                "Failed to join base URL '{}' with endpoint '{}': {}",
                base_url, endpoint, e
            ))
        })?;

        let mut request_builder = self.http_client.request(method.clone(), full_url.clone());

        let mut headers = HeaderMap::new();
        if method == Method::POST || method == Method::PUT || method == Method::PATCH {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut body_str_for_log: Option<String> = None;
        if let Some(body_data) = body {
            let body_str = serde_json::to_string(body_data).map_err(RouteError::JsonError)?;
            body_str_for_log = Some(body_str.clone());
            request_builder = request_builder.body(body_str);
        }

        request_builder = request_builder.headers(headers);

        log::debug!("Preparing request: Method={}, URL={}", method, full_url);
        if let Some(log_body) = &body_str_for_log {
            log::debug!("Request body: {}", log_body);
        } else {
            log::debug!("Request body: None");
        }

        let response = request_builder
            .send()
            .await
            .map_err(RouteError::Http)?;

        let status = response.status();
        if status.is_success() {
            let body_bytes = response.bytes().await.map_err(RouteError::Http)?;
            log::debug!(
                "Request successful. Response body: {}",
                String::from_utf8_lossy(&body_bytes)
            );
            serde_json::from_slice(&body_bytes).map_err(|e| {
                RouteError::JsonDeserializationFailed(format!(
                    "Error: {}, Body: {}",
                    e,
                    String::from_utf8_lossy(&body_bytes)
                ))
            })
        } else {
            let error_body_bytes = response.bytes().await.map_err(RouteError::Http)?;
            let error_body_str = String::from_utf8_lossy(&error_body_bytes).to_string();
            log::warn!(
                "Request failed with status {}. Response body: {}",
                status,
                error_body_str
            );
            match serde_json::from_slice::<Value>(&error_body_bytes) {
                Ok(json_value) => Err(RouteError::from_response(status.as_u16(), json_value)),
                Err(_) => {
                    let fallback_json = serde_json::json!({ "error": error_body_str });
                    Err(RouteError::from_response(status.as_u16(), fallback_json))
                }
            }
        }
    }
}
