//! oncoprobe-web — HTTP surface of Oncoprobe.
//! Provides:
//!   - POST /api/detect-protein — sequence classification + drug report
//!   - GET  /api/model-metrics  — evaluation metrics and plots
//!   - GET  /health             — liveness probe

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
