use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tasks_server::web::health_check_handler;
use tower::ServiceExt;

/// Create a router for testing web endpoints.
/// This function creates a minimal router with just the public routes needed for testing.
fn create_test_router() -> Router {
    Router::new().route("/health", axum::routing::get(health_check_handler))
}

#[tokio::test]
async fn can_check_health_endpoint() {
    let app = create_test_router();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&body).unwrap(), "OK");
}
