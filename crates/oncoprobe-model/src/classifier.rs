//! Loading and applying the pre-trained classifier artifact.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use oncoprobe_common::{OncoprobeError, PredictionLabel, Result};
use oncoprobe_features::FeatureRow;

/// Offline-exported model artifact: the trained column order plus the
/// logistic-regression parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub columns: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// Classifier output: the binary label and the positive-class probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: PredictionLabel,
    pub probability: f64,
}

/// Process-wide classifier, loaded once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct Classifier {
    artifact: ModelArtifact,
}

impl Classifier {
    pub fn new(artifact: ModelArtifact) -> Result<Self> {
        if artifact.columns.len() != artifact.coefficients.len() {
            return Err(OncoprobeError::Model(format!(
                "artifact has {} columns but {} coefficients",
                artifact.columns.len(),
                artifact.coefficients.len()
            )));
        }
        if artifact.columns.is_empty() {
            return Err(OncoprobeError::Model("artifact has no columns".to_string()));
        }
        Ok(Self { artifact })
    }

    /// Load the JSON artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let artifact: ModelArtifact = serde_json::from_str(&text)?;
        info!(
            columns = artifact.columns.len(),
            path = %path.as_ref().display(),
            "Classifier artifact loaded"
        );
        Self::new(artifact)
    }

    pub fn trained_columns(&self) -> &[String] {
        &self.artifact.columns
    }

    /// Project a merged feature row onto the trained column order.
    /// A column absent from the row is an error, never a silent zero.
    pub fn align(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        self.artifact
            .columns
            .iter()
            .map(|col| {
                row.get(col)
                    .ok_or_else(|| OncoprobeError::MissingFeature(col.clone()))
            })
            .collect()
    }

    /// Classify a feature row: sigmoid of the weighted sum against the
    /// decision threshold.
    pub fn predict(&self, row: &FeatureRow) -> Result<Prediction> {
        let features = self.align(row)?;

        let z: f64 = features
            .iter()
            .zip(self.artifact.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.artifact.intercept;

        let probability = 1.0 / (1.0 + (-z).exp());
        let label = if probability >= self.artifact.threshold {
            PredictionLabel::Positive
        } else {
            PredictionLabel::Negative
        };

        Ok(Prediction { label, probability })
    }
}
