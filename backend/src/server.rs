//! HTTP server wiring
//!
//! Builds the router with its middleware stack and handles shutdown signals.

use crate::api;
use crate::state::SharedState;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, put, IntoMakeService},
    Router, ServiceExt,
};
use std::time::Instant;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePath, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router over `state`
pub fn build_router(state: SharedState) -> Router {
    let courses = Router::new()
        .route("/courses", get(api::courses::list_courses))
        .route(
            "/courses/user/:user_email",
            get(api::courses::list_user_courses).put(api::courses::enroll_in_shadowed_course),
        )
        .route(
            "/courses/title/:title",
            get(api::courses::get_course_by_title).put(api::courses::enroll_in_shadowed_course),
        )
        .route("/courses/:id/enroll", put(api::courses::enroll_in_course));

    Router::new()
        .route("/api/health", get(api::health::health_check))
        .nest("/api/v1", courses)
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Service handed to `axum::serve`
pub type App = IntoMakeService<NormalizePath<Router>>;

/// Build the servable application over `state`
///
/// Trailing slashes are trimmed before routing, so `/api/v1/courses/`
/// reaches the same handler as `/api/v1/courses`.
pub fn build_app(state: SharedState) -> App {
    let app = NormalizePath::trim_trailing_slash(build_router(state));
    ServiceExt::<Request>::into_make_service(app)
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
