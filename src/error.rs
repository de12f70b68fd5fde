// src/error.rs
use crate::summary::fixed_two;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing failed: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonDeserializationFailed(String),

    #[error("Please set start location first")]
    StartNotSet,

    #[error("Please set both start and end locations")]
    EndpointsMissing,

    #[error("Too far! Max 3km. You selected {}km", fixed_two(.distance_km))]
    EndTooFar { distance_km: f64 },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Routing backend reported an error: {0}")]
    Backend(String),

    #[error("Routing backend rejected the request: {0}")]
    RequestRejected(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    ServerError(String),

    #[error("Unexpected response (HTTP {status}): {message}")]
    UnexpectedResponse { status: u16, message: String },
}

impl RouteError {
    /// Creates a `RouteError` from an HTTP status code and a JSON response body.
    ///
    /// The routing backend reports failures either as `{"detail": ...}` (request
    /// validation) or `{"error": "..."}`; anything else is rendered verbatim.
    pub(crate) fn from_response(status_code: u16, response_body: Value) -> Self {
        let message = response_body
            .get("detail")
            .or_else(|| response_body.get("error"))
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
            .unwrap_or_else(|| response_body.to_string());

        match status_code {
            404 => RouteError::NotFound(format!("(HTTP {}) {}", status_code, message)),
            400 | 422 => RouteError::RequestRejected(format!("(HTTP {}) {}", status_code, message)),
            s if s >= 500 => {
                RouteError::ServerError(format!("Server error (HTTP {}): {}", status_code, message))
            }
            _ => RouteError::UnexpectedResponse {
                status: status_code,
                message,
            },
        }
    }

    /// Whether the error stems from the user's selection rather than the network or backend.
    ///
    /// User errors block the action and are reported synchronously; the selection is left as it was.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RouteError::StartNotSet
                | RouteError::EndpointsMissing
                | RouteError::EndTooFar { .. }
                | RouteError::InvalidCoordinate(_)
        )
    }
}
