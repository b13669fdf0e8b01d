//! Model evaluation artifacts: held-out metrics plus the evaluation plots,
//! served to the client as base64 PNGs.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use oncoprobe_common::{OncoprobeError, Result};

/// Held-out evaluation metrics, computed offline alongside the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub f1_score: f64,
    pub roc_auc: f64,
}

/// Evaluation plot images, base64-encoded PNG. A missing plot file simply
/// omits the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_recall_curve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roc_curve: Option<String>,
}

/// Wire shape of GET /api/model-metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics: EvaluationMetrics,
    pub images: PlotImages,
}

const METRICS_FILE: &str = "metrics.json";

impl MetricsReport {
    /// Load `metrics.json` and any evaluation plots from the artifacts
    /// directory. The metrics file is required; plots are optional.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let text = std::fs::read_to_string(dir.join(METRICS_FILE)).map_err(|e| {
            OncoprobeError::Model(format!("metrics file unreadable in {}: {}", dir.display(), e))
        })?;
        let metrics: EvaluationMetrics = serde_json::from_str(&text)?;

        let mut images = PlotImages::default();
        let plots: [(&mut Option<String>, &str); 3] = [
            (&mut images.confusion_matrix, "confusion_matrix.png"),
            (&mut images.precision_recall_curve, "precision_recall_curve.png"),
            (&mut images.roc_curve, "roc_curve.png"),
        ];
        for (slot, file) in plots {
            match std::fs::read(dir.join(file)) {
                Ok(bytes) => {
                    *slot = Some(base64::engine::general_purpose::STANDARD.encode(bytes));
                }
                Err(_) => debug!(file, "evaluation plot not present"),
            }
        }

        Ok(Self { metrics, images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_metrics_with_partial_plots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("metrics.json"),
            r#"{"accuracy": 0.91, "f1_score": 0.88, "roc_auc": 0.95}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("roc_curve.png"), b"\x89PNG fake").unwrap();

        let report = MetricsReport::load(dir.path()).unwrap();
        assert_eq!(report.metrics.accuracy, 0.91);
        assert!(report.images.roc_curve.is_some());
        assert!(report.images.confusion_matrix.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["images"].get("confusion_matrix").is_none());
    }

    #[test]
    fn test_each_plot_lands_in_its_own_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("metrics.json"),
            r#"{"accuracy": 0.9, "f1_score": 0.9, "roc_auc": 0.9}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("confusion_matrix.png"), b"cm").unwrap();
        std::fs::write(dir.path().join("precision_recall_curve.png"), b"pr").unwrap();

        let report = MetricsReport::load(dir.path()).unwrap();
        assert!(report.images.confusion_matrix.is_some());
        assert!(report.images.precision_recall_curve.is_some());
        assert!(report.images.roc_curve.is_none());
        assert_ne!(report.images.confusion_matrix, report.images.precision_recall_curve);
    }

    #[test]
    fn test_load_requires_metrics_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MetricsReport::load(dir.path()).is_err());
    }
}
