// tests/client_integration.rs
use serde_json::{json, Value};
use skate_route::error::RouteError;
use skate_route::{GeoPoint, RouteClient};

use test_utils::initialize_logger_once;
use test_utils::shared::{unreachable_url, MockBackend};

#[cfg(test)]
mod tests {
    use super::*;

    fn route_body() -> String {
        json!({
            "geometry": [[40.0001, -74.5001], [40.005, -74.495], [40.0099, -74.4901]],
            "distance_km": 1.3456,
            "skate_time_min": 6.5
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_calculate_route_posts_json_to_main() {
        initialize_logger_once();
        let backend = MockBackend::start(200, &route_body()).await;
        let client = backend.client();

        let start = GeoPoint::new(40.0, -74.5);
        let end = GeoPoint::new(40.01, -74.49);
        let route = client.calculate_route(start, end).await.unwrap();

        assert_eq!(route.geometry.len(), 3);
        assert_eq!(route.geometry[0], [40.0001, -74.5001]);
        assert_eq!(route.distance_km, 1.3456);
        assert_eq!(route.skate_time_min, 6.5);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/main");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
        let sent: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            sent,
            json!({
                "start": { "lat": 40.0, "lng": -74.5 },
                "end": { "lat": 40.01, "lng": -74.49 }
            })
        );
    }

    #[tokio::test]
    async fn test_backend_error_body_with_ok_status() {
        initialize_logger_once();
        let backend = MockBackend::start(200, r#"{"error": "No route found"}"#).await;
        let result = backend
            .client()
            .calculate_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01))
            .await;

        match result {
            Err(RouteError::Backend(msg)) => assert_eq!(msg, "No route found"),
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_status() {
        initialize_logger_once();
        let backend = MockBackend::start(500, "Internal Server Error").await;
        let result = backend
            .client()
            .calculate_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01))
            .await;

        match result {
            Err(RouteError::ServerError(msg)) => {
                assert_eq!(msg, "Server error (HTTP 500): Internal Server Error")
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validation_error_status() {
        initialize_logger_once();
        let backend = MockBackend::start(
            422,
            r#"{"detail": [{"loc": ["body", "start"], "msg": "field required"}]}"#,
        )
        .await;
        let result = backend
            .client()
            .calculate_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01))
            .await;

        match result {
            Err(RouteError::RequestRejected(msg)) => {
                assert!(msg.starts_with("(HTTP 422)"));
                assert!(msg.contains("field required"));
            }
            other => panic!("Expected RequestRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        initialize_logger_once();
        let backend = MockBackend::start(200, r#"{"geometry": "not a list"}"#).await;
        let result = backend
            .client()
            .calculate_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01))
            .await;

        assert!(
            matches!(result, Err(RouteError::JsonDeserializationFailed(_))),
            "Expected JsonDeserializationFailed, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_null_success_body() {
        initialize_logger_once();
        let backend = MockBackend::start(200, "null").await;
        let result = backend
            .client()
            .calculate_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01))
            .await;

        assert!(
            matches!(result, Err(RouteError::JsonDeserializationFailed(_))),
            "Expected JsonDeserializationFailed, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        initialize_logger_once();
        let client = RouteClient::new(&unreachable_url().await).unwrap();
        let result = client
            .calculate_route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01))
            .await;

        match result {
            Err(RouteError::Http(e)) => assert!(e.is_connect(), "Expected connect error: {}", e),
            other => panic!("Expected Http error, got {:?}", other),
        }
    }
}
