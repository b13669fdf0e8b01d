//! GET /api/model-metrics — held-out evaluation metrics and plots.

use axum::extract::State;
use axum::Json;

use oncoprobe_model::MetricsReport;

use crate::error::ApiError;
use crate::state::SharedState;

pub async fn model_metrics(
    State(state): State<SharedState>,
) -> Result<Json<MetricsReport>, ApiError> {
    let report = MetricsReport::load(&state.metrics_dir)?;
    Ok(Json(report))
}
