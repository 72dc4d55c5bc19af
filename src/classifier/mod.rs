//! Classifier capability used by the prediction endpoint.
//!
//! Route handlers only see [`Classifier`]; the concrete model format lives in
//! sibling modules and is chosen by [`load_from_path`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{FeatureVector, PredictionResult, CHANNEL_COUNT};

mod gbt;

pub use gbt::GbtClassifier;

// ---

/// Errors raised while loading or evaluating a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model structure: {0}")]
    InvalidStructure(String),

    #[error("invalid node reference in stage {stage} tree {tree} node {node}")]
    InvalidNodeReference {
        stage: usize,
        tree: usize,
        node: usize,
    },

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("non-finite feature value at index {0}")]
    NonFiniteFeature(usize),

    #[error("raw score for slot {0} overflowed")]
    NonFiniteScore(usize),
}

/// A trained classifier mapping a feature vector to a fault level.
///
/// Implementations are immutable after construction and shared across
/// request tasks.
pub trait Classifier: Send + Sync {
    /// Class labels in score order.
    fn classes(&self) -> &[i64];

    /// Predict the class label for one feature vector.
    fn classify(&self, features: &FeatureVector) -> Result<i64, ModelError>;

    /// Per-class probability estimates, parallel to [`Classifier::classes`].
    ///
    /// Returns `Ok(None)` for classifiers without probability support.
    fn estimate_probabilities(
        &self,
        _features: &FeatureVector,
    ) -> Result<Option<Vec<f64>>, ModelError> {
        Ok(None)
    }
}

/// Run one classification, attaching probabilities when the model has them.
pub fn predict(
    model: &dyn Classifier,
    features: &FeatureVector,
) -> Result<PredictionResult, ModelError> {
    // ---
    let level = model.classify(features)?;
    let confidence_scores = model.estimate_probabilities(features)?;

    Ok(PredictionResult {
        level,
        confidence_scores,
    })
}

/// Load a classifier from a serialized model file.
///
/// The model must take exactly one input per sensor channel.
pub fn load_from_path(path: &Path) -> Result<GbtClassifier, ModelError> {
    // ---
    let data = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let model = GbtClassifier::from_json_str(&data)?;
    if model.n_features() != CHANNEL_COUNT {
        return Err(ModelError::FeatureCount {
            expected: CHANNEL_COUNT,
            actual: model.n_features(),
        });
    }

    Ok(model)
}
