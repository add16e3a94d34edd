use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::signup::signup;
use super::handlers::ApiResponseBody;
use super::handlers::INTERNAL_ERROR_MESSAGE;
use crate::account::ports::SignupServicePort;

/// Shared state for the HTTP handlers.
pub struct AppState<S: SignupServicePort> {
    pub signup_service: Arc<S>,
}

impl<S: SignupServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            signup_service: Arc::clone(&self.signup_service),
        }
    }
}

pub fn create_router<S: SignupServicePort>(signup_service: Arc<S>) -> Router {
    let state = AppState { signup_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/auth/signup", post(signup::<S>))
        .route("/health", get(health))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (
        status,
        Json(ApiResponseBody::new_error(
            status,
            INTERNAL_ERROR_MESSAGE.to_string(),
        )),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tower::ServiceExt;

    use super::*;
    use crate::account::errors::SignupError;
    use crate::account::models::Account;
    use crate::account::models::SignupRequest;

    struct PanickingService;

    #[async_trait]
    impl SignupServicePort for PanickingService {
        async fn signup(&self, _request: SignupRequest) -> Result<Account, SignupError> {
            panic!("storage handle poisoned");
        }
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(Arc::new(PanickingService));

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error_envelope() {
        let router = create_router(Arc::new(PanickingService));

        let response = router
            .oneshot(
                Request::post("/auth/signup")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"email":"user@example.com","password":"ValidPass123!"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], 500);
        assert_eq!(body["data"]["message"], INTERNAL_ERROR_MESSAGE);
    }
}
