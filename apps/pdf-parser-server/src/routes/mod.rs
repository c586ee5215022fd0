//! Route modules for the PDF Parser API

pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Room for multipart boundaries, headers and text fields on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state
        .config()
        .upload
        .max_file_size
        .saturating_add(MULTIPART_OVERHEAD);
    let cors = cors_layer(&state.config().cors);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route(
            "/upload",
            post(upload::upload_pdf).layer(DefaultBodyLimit::max(body_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS restricted to the configured origins
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
