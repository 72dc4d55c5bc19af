// src/routes/predict.rs
//! Fault-level prediction endpoint.
//!
//! Defines `POST /predict`: parse the JSON body, validate the 8 sensor
//! channels, assemble the feature vector and run the shared classifier.
//! Follows the Explicit Module Boundary Pattern (EMBP):
//! - Internal to this file: handler and success response type
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/predict` route
//!
//! Failures return through [`crate::ApiError`]; OPTIONS never reaches this
//! handler because the gateway's CORS layer answers it.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    assemble_features, classifier, timestamp_now, validate_reading, ApiError, ApiResult, AppState,
};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/predict", post(handler))
}

/// Successful `/predict` body.
#[derive(Debug, Serialize)]
struct PredictResponse {
    status: &'static str,
    prediction_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence_scores: Option<Vec<f64>>,
    timestamp: String,
}

async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    // ---
    let Json(body) = payload?;
    debug!("POST /predict - validating");

    let reading = validate_reading(&body)?;
    let features = assemble_features(reading)?;

    let model = state.model().ok_or(ApiError::ModelUnavailable)?;
    let result = classifier::predict(model, &features)?;

    info!(
        input = %body,
        features = ?features.as_slice(),
        prediction = result.level,
        confidence = ?result.confidence_scores,
        "Prediction served"
    );

    Ok(Json(PredictResponse {
        status: "success",
        prediction_level: result.level,
        confidence_scores: result.confidence_scores,
        timestamp: timestamp_now(),
    }))
}
