// src/routes/health.rs
//! Model readiness check for the fault-level service.
//!
//! This module defines the `/health` route used by container orchestrators
//! and CI pipelines. Unlike a bare liveness probe it reports whether the
//! classifier was loaded at startup, so a process that came up without a
//! model answers 503 here. It follows the Explicit Module Boundary Pattern
//! (EMBP):
//! - Internal to this file: endpoint handler and response type
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{timestamp_now, ApiError, ApiResult, AppState};

/// JSON response body for a healthy `/health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Handle `GET /health`.
///
/// Reads only the model-loaded flag. Returns 200 when a model is present and
/// the shared 503 error body otherwise.
async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if !state.is_ready() {
        return Err(ApiError::ModelUnavailable);
    }

    Ok(Json(HealthResponse {
        status: "healthy",
        timestamp: timestamp_now(),
    }))
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
