// SPDX-License-Identifier: MIT

//! The single submission endpoint: `POST /testing/pending`. Thin by design —
//! it only extracts the caller identity the upstream auth layer already
//! resolved, then hands off to `judge_engine::submit`.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use judge_engine::{submit, IntakeContext, IntakeError};

#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<IntakeContext>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/testing/pending", post(submit_pending)).with_state(state)
}

#[derive(Debug, Deserialize)]
struct SubmitQuery {
    repo: String,
    stage: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SuccessBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// `provider`/`subject` are trusted as already-authenticated by the
/// out-of-scope identity layer that sits in front of this service; this
/// handler never itself validates the bearer token, only reads the headers
/// that layer is expected to set.
async fn submit_pending(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let Some(provider) = header_str(&headers, "x-provider") else {
        return unauthorized();
    };
    let Some(subject) = header_str(&headers, "x-subject") else {
        return unauthorized();
    };

    match submit(&state.intake, &query.repo, provider, subject, query.stage).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SuccessBody { message: "Successfully pushed to pending".to_string() }),
        )
            .into_response(),
        Err(IntakeError::Unauthorized) => unauthorized(),
        Err(IntakeError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody { message: format!("repository not found: {id}") }),
        )
            .into_response(),
        Err(IntakeError::QueueFull) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { message: "pending queue is full".to_string() }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(%err, repository_id = %query.repo, "submission failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { message: err.to_string() })).into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn unauthorized() -> axum::response::Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody { message: "caller does not own this repository".to_string() }))
        .into_response()
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
