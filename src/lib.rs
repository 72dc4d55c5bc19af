//! Fault-level inference service for engine sensor readings.
//!
//! Loads a gradient-boosted-tree classifier once at startup and serves it
//! over HTTP:
//! - `POST /predict` – classify one reading of the 8 sensor channels
//! - `GET /health` – 200 when a model is loaded, 503 otherwise
//! - `GET /sensors/thresholds` – static operating bands per channel
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): each module
//! exports a narrow surface, re-exported here so that `routes/*.rs` only
//! depend on the crate root.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod thresholds;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::{load_model, AppState};

// Not used here; imported so routes/*.rs reach them through the crate root.
pub use models::{timestamp_now, Channel, FeatureVector, PredictionResult};
pub use validation::{assemble_features, validate_reading};
