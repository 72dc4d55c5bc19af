//! Gradient-boosted decision tree classifier read from a JSON export.
//!
//! Scoring follows the usual boosted-classifier convention: every class
//! starts from its init score, each stage adds `learning_rate * tree(x)` per
//! class, and the raw scores are turned into probabilities with a sigmoid
//! (two classes, one tree per stage) or a softmax (more than two classes,
//! one tree per class per stage).

use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError};
use crate::models::FeatureVector;

// ---

/// A decision tree node. Splits send `x[feature] <= threshold` left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// One regression tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Tree {
    pub(crate) nodes: Vec<Node>,
}

impl Tree {
    // ---
    #[cfg(test)]
    fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Walk the tree. Only called on trees accepted by [`GbtClassifier::validate`],
    /// where every child index is in bounds and greater than its parent.
    fn evaluate(&self, features: &[f64]) -> f64 {
        // ---
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Boosted tree ensemble over a fixed number of input features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbtClassifier {
    n_features: usize,
    classes: Vec<i64>,
    learning_rate: f64,
    init_scores: Vec<f64>,
    stages: Vec<Vec<Tree>>,
}

impl GbtClassifier {
    // ---
    #[cfg(test)]
    fn new(
        n_features: usize,
        classes: Vec<i64>,
        learning_rate: f64,
        init_scores: Vec<f64>,
        stages: Vec<Vec<Tree>>,
    ) -> Result<Self, ModelError> {
        // ---
        let model = Self {
            n_features,
            classes,
            learning_rate,
            init_scores,
            stages,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_str(data: &str) -> Result<Self, ModelError> {
        // ---
        let model: Self = serde_json::from_str(data)?;
        model.validate()?;
        Ok(model)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }

    /// Trees per stage: one for binary models, one per class otherwise.
    fn width(&self) -> usize {
        if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        // ---
        let invalid = |msg: String| Err(ModelError::InvalidStructure(msg));

        if self.n_features == 0 {
            return invalid("model declares no features".into());
        }
        if self.classes.len() < 2 {
            return invalid(format!("need at least 2 classes, got {}", self.classes.len()));
        }
        for (i, class) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(class) {
                return invalid(format!("duplicate class label {class}"));
            }
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return invalid(format!("learning rate {} must be positive", self.learning_rate));
        }

        let width = self.width();
        if self.init_scores.len() != width {
            return invalid(format!(
                "expected {width} init scores, got {}",
                self.init_scores.len()
            ));
        }
        if self.init_scores.iter().any(|s| !s.is_finite()) {
            return invalid("init scores must be finite".into());
        }
        if self.stages.is_empty() {
            return invalid("model has no stages".into());
        }

        for (s_idx, stage) in self.stages.iter().enumerate() {
            if stage.len() != width {
                return invalid(format!(
                    "stage {s_idx} has {} trees, expected {width}",
                    stage.len()
                ));
            }

            for (t_idx, tree) in stage.iter().enumerate() {
                if tree.nodes.is_empty() {
                    return invalid(format!("stage {s_idx} tree {t_idx} has no nodes"));
                }

                for (n_idx, node) in tree.nodes.iter().enumerate() {
                    match node {
                        Node::Leaf { value } => {
                            if !value.is_finite() {
                                return invalid(format!(
                                    "stage {s_idx} tree {t_idx} node {n_idx} has non-finite value"
                                ));
                            }
                        }
                        Node::Split {
                            feature,
                            threshold,
                            left,
                            right,
                        } => {
                            if *feature >= self.n_features {
                                return invalid(format!(
                                    "stage {s_idx} tree {t_idx} node {n_idx} splits on feature {feature}"
                                ));
                            }
                            if !threshold.is_finite() {
                                return invalid(format!(
                                    "stage {s_idx} tree {t_idx} node {n_idx} has non-finite threshold"
                                ));
                            }
                            // Children after parent keeps traversal acyclic.
                            for child in [*left, *right] {
                                if child <= n_idx || child >= tree.nodes.len() {
                                    return Err(ModelError::InvalidNodeReference {
                                        stage: s_idx,
                                        tree: t_idx,
                                        node: n_idx,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Accumulated raw score per tree slot (one for binary, one per class otherwise).
    fn raw_scores(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        // ---
        let x = features.as_slice();
        if x.len() != self.n_features {
            return Err(ModelError::FeatureCount {
                expected: self.n_features,
                actual: x.len(),
            });
        }
        if let Some(idx) = x.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature(idx));
        }

        let mut scores = self.init_scores.clone();
        for stage in &self.stages {
            for (score, tree) in scores.iter_mut().zip(stage) {
                *score += self.learning_rate * tree.evaluate(x);
            }
        }

        // Finite leaves can still sum past f64::MAX.
        if let Some(slot) = scores.iter().position(|s| !s.is_finite()) {
            return Err(ModelError::NonFiniteScore(slot));
        }

        Ok(scores)
    }
}

impl Classifier for GbtClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn classify(&self, features: &FeatureVector) -> Result<i64, ModelError> {
        // ---
        let raw = self.raw_scores(features)?;

        let idx = if raw.len() == 1 {
            usize::from(raw[0] > 0.0)
        } else {
            // First maximum wins ties.
            raw.iter()
                .enumerate()
                .fold(0, |best, (i, s)| if *s > raw[best] { i } else { best })
        };

        Ok(self.classes[idx])
    }

    fn estimate_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Vec<f64>>, ModelError> {
        // ---
        let raw = self.raw_scores(features)?;

        if raw.len() == 1 {
            let p = 1.0 / (1.0 + (-raw[0]).exp());
            return Ok(Some(vec![1.0 - p, p]));
        }

        let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = raw.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        Ok(Some(exps.into_iter().map(|e| e / total).collect()))
    }
}
