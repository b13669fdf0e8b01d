//! POST /api/detect-protein — the full detection pipeline.
//!
//! sequence → FASTA → external extractor → merged feature row → classifier;
//! a POSITIVE call additionally maps the UniProt ID to DrugBank IDs, asks
//! the generative backend for a repurposing report, and enriches each drug
//! with PubChem/PubMed/ClinicalTrials evidence. Everything downstream of
//! the prediction is best-effort.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use oncoprobe_common::{DrugReport, PredictionLabel};
use oncoprobe_evidence::EvidenceSource;
use oncoprobe_features::{merge_feature_csvs, normalise_sequence, validate_accession, write_fasta};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub sequence: String,
    #[serde(rename = "uniprotId")]
    pub uniprot_id: String,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub predictions: PredictionLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drugs: Option<Vec<DrugReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn detect_protein(
    State(state): State<SharedState>,
    Json(req): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, ApiError> {
    validate_accession(&req.uniprot_id)?;
    let sequence = normalise_sequence(&req.sequence)?;

    // Request-scoped scratch directory; removed on drop, error paths included
    let scratch = tempfile::tempdir()
        .map_err(|e| ApiError::Internal(format!("scratch dir: {}", e)))?;

    let fasta = write_fasta(scratch.path(), &req.uniprot_id, &sequence).await?;
    let csvs = state.extractor.run(&fasta, scratch.path()).await?;
    let row = merge_feature_csvs(&csvs)?;

    let prediction = state.classifier.predict(&row)?;
    info!(
        uniprot_id = %req.uniprot_id,
        label = %prediction.label,
        probability = prediction.probability,
        "sequence classified"
    );

    if !prediction.label.is_positive() {
        return Ok(Json(DetectResponse {
            predictions: PredictionLabel::Negative,
            drugs: None,
            message: None,
        }));
    }

    let Some(drug_ids) = state.drugbank.drug_ids(&req.uniprot_id) else {
        return Ok(Json(DetectResponse {
            predictions: PredictionLabel::Positive,
            drugs: None,
            message: Some(format!(
                "No DrugBank repurposing candidates are known for {}",
                req.uniprot_id
            )),
        }));
    };

    let (mut drugs, message) = match state.reporter.generate(drug_ids).await {
        Ok(report) => (report.drugs, report.disclaimer),
        Err(e) => {
            warn!(error = %e, "repurposing report unavailable, degrading to empty list");
            (
                Vec::new(),
                Some("Drug repurposing report is currently unavailable.".to_string()),
            )
        }
    };

    for drug in &mut drugs {
        enrich(&state, drug).await;
    }

    Ok(Json(DetectResponse {
        predictions: PredictionLabel::Positive,
        drugs: Some(drugs),
        message,
    }))
}

/// Attach PubChem, PubMed and ClinicalTrials evidence to one drug.
/// Each source failure logs a warning and leaves that field empty.
async fn enrich(state: &SharedState, drug: &mut DrugReport) {
    match state.pubchem.fetch_compound(&drug.name).await {
        Ok(record) => drug.pubchem = record,
        Err(e) => warn!(drug = %drug.name, error = %e, "PubChem lookup failed"),
    }

    drug.pubmed_articles = state
        .pubmed
        .links_for(&drug.name, state.max_evidence)
        .await
        .unwrap_or_else(|e| {
            warn!(drug = %drug.name, error = %e, "PubMed lookup failed");
            Vec::new()
        });

    drug.clinical_trials = state
        .trials
        .links_for(&drug.name, state.max_evidence)
        .await
        .unwrap_or_else(|e| {
            warn!(drug = %drug.name, error = %e, "ClinicalTrials lookup failed");
            Vec::new()
        });
}
