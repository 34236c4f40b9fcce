//! Offline-trained wait estimator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::features::FeatureVector;

/// Errors that can occur while loading an estimator model
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("Failed to read model {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model weight '{0}' is not finite")]
    NonFiniteWeight(String),
}

/// Regression model mapping features to minutes of wait
pub trait WaitEstimator: Send + Sync {
    /// Raw prediction in minutes; None when the model cannot score the input
    fn predict(&self, features: &FeatureVector) -> Option<f64>;
}

/// Linear model exported as JSON
///
/// Numeric columns are multiplied by their weight as-is. Label columns end in
/// `_encoded` and are replaced by the label's index in the matching encoder
/// class list; labels the encoder has not seen encode to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearEstimator {
    pub intercept: f64,

    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    /// Encoder name ("park", "ride", "type", "weather") -> sorted class labels
    #[serde(default)]
    pub encoders: BTreeMap<String, Vec<String>>,
}

impl LinearEstimator {
    pub fn from_json_str(content: &str) -> Result<Self, EstimatorError> {
        let model: Self = serde_json::from_str(content)?;
        if !model.intercept.is_finite() {
            return Err(EstimatorError::NonFiniteWeight("intercept".to_string()));
        }
        if let Some((name, _)) = model.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(EstimatorError::NonFiniteWeight(name.clone()));
        }
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EstimatorError> {
        let path = path.as_ref();
        debug!(?path, "LinearEstimator::load: called");
        let content = fs::read_to_string(path).map_err(|source| EstimatorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&content)?;
        info!("Loaded wait model from {} ({} weights)", path.display(), model.weights.len());
        Ok(model)
    }

    /// Load a model if one is configured, logging and discarding failures
    pub fn load_optional(path: Option<&Path>) -> Option<Self> {
        let path = path?;
        match Self::load(path) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!(error = %e, "Wait model unavailable, using heuristic waits");
                None
            }
        }
    }

    fn encode(&self, encoder: &str, label: &str) -> f64 {
        self.encoders
            .get(encoder)
            .and_then(|classes| classes.iter().position(|c| c == label))
            .map(|i| i as f64)
            .unwrap_or(0.0)
    }

    fn column(&self, name: &str, features: &FeatureVector) -> Option<f64> {
        if let Some(encoder) = name.strip_suffix("_encoded") {
            let label = features.label(encoder)?;
            return Some(self.encode(encoder, &label));
        }
        features.numeric(name)
    }
}

impl WaitEstimator for LinearEstimator {
    fn predict(&self, features: &FeatureVector) -> Option<f64> {
        let mut total = self.intercept;
        for (name, weight) in &self.weights {
            match self.column(name, features) {
                Some(value) => total += weight * value,
                None => {
                    debug!(column = %name, "LinearEstimator::predict: unknown column");
                    return None;
                }
            }
        }
        total.is_finite().then_some(total)
    }
}

/// Round a raw prediction to a 5-minute bucket, floored at zero
pub fn round_to_bucket(minutes: f64) -> u32 {
    if !minutes.is_finite() {
        return 0;
    }
    (5.0 * (minutes.max(0.0) / 5.0).round()) as u32
}
