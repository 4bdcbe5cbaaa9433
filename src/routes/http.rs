//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;

use axum::{extract::State, http::{StatusCode, Uri}, response::IntoResponse, Json};
use tracing::{debug, instrument};

use crate::logic::{check_answer, issue_problem};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "debug")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { status: "ok" })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_problem(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(issue_problem(&state).await)
}

#[instrument(level = "info", skip(state, body), fields(problem_id = body.problem_id))]
pub async fn http_post_check_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckAnswerIn>,
) -> impl IntoResponse {
    Json(check_answer(&state, &body).await)
}

/// Unknown `/api/*` paths must not fall through to the SPA.
pub async fn api_not_found(uri: Uri) -> impl IntoResponse {
    debug!(target: "math_challenge_backend", %uri, "Unknown API path");
    (StatusCode::NOT_FOUND, Json(ErrorOut::new("Not found")))
}
