//! Request validation and feature assembly for `/predict`.
//!
//! Validation only checks presence and JSON type of every channel. Physical
//! ranges published by [`crate::thresholds`] are not enforced here.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Channel, FeatureVector, CHANNEL_COUNT};

// ---

/// Client-correctable problems with a prediction request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing sensor data: {0}")]
    Missing(Channel),

    #[error("Invalid value type for {0}")]
    InvalidType(Channel),
}

/// Raised when features are assembled from data that skipped validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("channel {0} missing from reading")]
    Missing(Channel),

    #[error("channel {0} is not numeric")]
    NotNumeric(Channel),
}

/// Check that `body` is an object carrying a JSON number for every channel.
///
/// Channels are checked in feature order and the first failure is reported.
/// Booleans, strings, arrays, objects and `null` are all rejected.
pub fn validate_reading(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    // ---
    let reading = body.as_object().ok_or(ValidationError::NotAnObject)?;

    for channel in Channel::ALL {
        match reading.get(channel.name()) {
            None => return Err(ValidationError::Missing(channel)),
            Some(Value::Number(_)) => {}
            Some(_) => return Err(ValidationError::InvalidType(channel)),
        }
    }

    Ok(reading)
}

/// Build the model input vector from a validated reading.
pub fn assemble_features(reading: &Map<String, Value>) -> Result<FeatureVector, AssemblyError> {
    // ---
    let mut values = [0.0; CHANNEL_COUNT];

    for channel in Channel::ALL {
        let value = reading
            .get(channel.name())
            .ok_or(AssemblyError::Missing(channel))?;
        values[channel.index()] = value.as_f64().ok_or(AssemblyError::NotNumeric(channel))?;
    }

    Ok(FeatureVector::new(values))
}
