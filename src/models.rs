//! Data models for the fault-level inference pipeline.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

// ---

/// Number of sensor channels the classifier expects.
pub const CHANNEL_COUNT: usize = 8;

/// One named sensor channel of an engine reading.
///
/// Declaration order is the feature order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    EngineLoad,
    Map,
    EngineRpm,
    Maf,
    CatalystTemp,
    IntakeAirTemp,
    ThrottlePos,
    CoolantTemp,
}

impl Channel {
    /// All channels in model feature order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::EngineLoad,
        Channel::Map,
        Channel::EngineRpm,
        Channel::Maf,
        Channel::CatalystTemp,
        Channel::IntakeAirTemp,
        Channel::ThrottlePos,
        Channel::CoolantTemp,
    ];

    /// JSON field name of the channel.
    pub const fn name(self) -> &'static str {
        // ---
        match self {
            Channel::EngineLoad => "Engine_load",
            Channel::Map => "MAP",
            Channel::EngineRpm => "Engine_RPM",
            Channel::Maf => "MAF",
            Channel::CatalystTemp => "Catalyst_temp",
            Channel::IntakeAirTemp => "Intake_air_temp",
            Channel::ThrottlePos => "Throttle_pos",
            Channel::CoolantTemp => "Coolant_temp",
        }
    }

    /// Position of the channel in the feature vector.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Model input: one value per channel, in [`Channel::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; CHANNEL_COUNT]);

impl FeatureVector {
    // ---
    pub fn new(values: [f64; CHANNEL_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Outcome of one classifier call.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Predicted fault level (class label).
    pub level: i64,

    /// Per-class probabilities, present only when the classifier provides them.
    pub confidence_scores: Option<Vec<f64>>,
}

/// Current time as an ISO-8601 / RFC 3339 UTC string.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
