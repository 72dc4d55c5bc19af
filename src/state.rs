//! Shared router state and the startup model loader.

use std::{path::Path, sync::Arc};

use tracing::{error, info};

use crate::classifier::{self, Classifier};

// ---

/// State handed to every route handler.
///
/// Built once before the server starts accepting connections and never
/// mutated afterwards; clones share the same loaded model.
#[derive(Clone, Default)]
pub struct AppState {
    model: Option<Arc<dyn Classifier>>,
}

impl AppState {
    // ---
    pub fn with_model(model: impl Classifier + 'static) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    /// State for a service whose model failed to load.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn model(&self) -> Option<&dyn Classifier> {
        self.model.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }
}

/// Load the classifier at `path` into a fresh [`AppState`].
///
/// Never fails: a load error is logged and yields an unavailable state so the
/// health endpoint stays reachable.
pub fn load_model(path: &Path) -> AppState {
    // ---
    match classifier::load_from_path(path) {
        Ok(model) => {
            info!(
                path = %path.display(),
                classes = ?model.classes(),
                stages = model.n_stages(),
                "Model loaded successfully"
            );
            AppState::with_model(model)
        }
        Err(e) => {
            error!(path = %path.display(), "Error loading model: {}", e);
            AppState::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_model_leaves_state_unavailable() {
        // ---
        let state = load_model(Path::new("/nonexistent/model.json"));
        assert!(!state.is_ready());
        assert!(state.model().is_none());
    }

    #[test]
    fn test_sample_model_makes_state_ready() {
        // ---
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/fault_gbt_model.json");
        let state = load_model(&path);
        assert!(state.is_ready());

        // Clones share the loaded model
        let clone = state.clone();
        assert_eq!(clone.model().unwrap().classes(), &[0, 1, 2, 3]);
    }
}
