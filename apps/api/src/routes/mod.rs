pub mod health;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::carousel::handlers as carousel;
use crate::errors::AppError;
use crate::optimize::handlers as optimize;
use crate::state::AppState;

/// Plain `OPTIONS` (no CORS preflight headers): empty 200.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/optimize",
            post(optimize::handle_optimize)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/carousel",
            get(carousel::handle_list_themes)
                .post(carousel::handle_generate)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Last-resort boundary: a handler panic becomes a logged 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    use crate::config::Config;

    async fn call(method: &str, uri: &str) -> (StatusCode, bytes::Bytes) {
        let router = build_router(AppState::new(Config::for_tests(None)));
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_options_is_empty_200() {
        for uri in ["/api/optimize", "/api/carousel"] {
            let (status, body) = call("OPTIONS", uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_wrong_method_is_405_json() {
        for (method, uri) in [
            ("GET", "/api/optimize"),
            ("PUT", "/api/optimize"),
            ("DELETE", "/api/carousel"),
        ] {
            let (status, body) = call(method, uri).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["error"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_handler_panic_is_500_json() {
        async fn boom() -> StatusCode {
            panic!("slide template exploded")
        }
        let router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));
        let response = router
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error");
    }

    #[test]
    fn test_panic_payload_kinds() {
        let from_str = handle_panic(Box::new("static message"));
        let from_string = handle_panic(Box::new(String::from("owned message")));
        let opaque = handle_panic(Box::new(42_u32));
        for response in [from_str, from_string, opaque] {
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call("GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }
}
