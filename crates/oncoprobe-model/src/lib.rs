//! oncoprobe-model — Pre-trained binary classifier and its evaluation
//! artifacts. The model is trained offline and exported as a JSON artifact
//! (trained column list, linear coefficients, intercept, threshold); this
//! crate only loads and applies it.

pub mod classifier;
pub mod metrics;

pub use classifier::{Classifier, ModelArtifact, Prediction};
pub use metrics::{EvaluationMetrics, MetricsReport, PlotImages};
