//! Router assembly: HTTP endpoints, static SPA, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::ServerSettings;
use crate::state::AppState;

pub mod http;

/// Local dev server of the frontend; always allowed when CORS is restricted.
const DEV_ORIGIN: &str = "http://localhost:3000";

/// Build the application router with:
/// - JSON API under `/api/...` (unknown API paths → 404 JSON)
/// - Static SPA from `settings.static_dir` with index fallback, if that directory exists
/// - CORS: any origin, or `FRONTEND_URL` + the dev server when configured
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, settings: &ServerSettings) -> Router {
    let router = Router::new()
        .route("/api/health", get(http::http_health))
        .route("/api/problem", get(http::http_get_problem))
        .route("/api/check_answer", post(http::http_post_check_answer))
        .route("/api", any(http::api_not_found))
        .route("/api/", any(http::api_not_found))
        .route("/api/*rest", any(http::api_not_found))
        .with_state(state)
        .layer(cors_layer(settings.frontend_url.as_deref()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    if settings.static_dir.is_dir() {
        info!(target: "math_challenge_backend", static_dir = %settings.static_dir.display(), "Serving static SPA");
        let index = settings.static_dir.join("index.html");
        let static_service = ServeDir::new(&settings.static_dir)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(index));
        router.fallback_service(static_service)
    } else {
        info!(target: "math_challenge_backend", static_dir = %settings.static_dir.display(), "No static bundle; API only");
        router
    }
}

fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let Some(frontend_url) = frontend_url else {
        return base.allow_origin(Any);
    };

    let origins: Vec<HeaderValue> = [DEV_ORIGIN, frontend_url.trim_end_matches('/')]
        .into_iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(target: "math_challenge_backend", origin = o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}
