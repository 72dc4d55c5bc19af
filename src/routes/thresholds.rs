// src/routes/thresholds.rs
//! `GET /sensors/thresholds`: the static band table, identical on every call.

use axum::{routing::get, Json, Router};

use crate::thresholds::{ThresholdTable, THRESHOLDS};

// ---

/// Handle `GET /sensors/thresholds` with the static band table.
async fn thresholds() -> Json<ThresholdTable> {
    Json(THRESHOLDS)
}

/// Generic over the gateway state; the handler reads no state.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/sensors/thresholds", get(thresholds))
}
