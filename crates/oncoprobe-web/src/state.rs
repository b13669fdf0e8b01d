//! Shared application state, built once at startup and read-only after.

use std::path::PathBuf;
use std::sync::Arc;

use oncoprobe_common::sandbox::SandboxClient;
use oncoprobe_common::{OncoprobeError, Result};
use oncoprobe_evidence::{ClinicalTrialsClient, DrugBankIndex, PubChemClient, PubMedClient};
use oncoprobe_features::{ExtractorCommand, FeatureExtractor};
use oncoprobe_llm::{GeminiBackend, LlmBackend, OpenAiCompatibleBackend, RepurposingReporter};
use oncoprobe_model::Classifier;

use crate::config::Config;

/// State injected into every Axum handler.
pub struct AppState {
    pub classifier: Classifier,
    pub metrics_dir: PathBuf,
    pub extractor: FeatureExtractor,
    pub drugbank: DrugBankIndex,
    pub reporter: RepurposingReporter,
    pub pubchem: PubChemClient,
    pub pubmed: PubMedClient,
    pub trials: ClinicalTrialsClient,
    pub max_evidence: usize,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the full pipeline from configuration. Fails fast on a missing
    /// model artifact or DrugBank CSV; the external APIs are only reached
    /// per request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = Classifier::load(&config.model.artifact)?;
        let drugbank = DrugBankIndex::load(&config.drugbank.csv_path)?;

        let extractor = FeatureExtractor::new(ExtractorCommand {
            program: config.extractor.program.clone(),
            args: config.extractor.args.clone(),
        });

        let sandbox = SandboxClient::new()?;
        let backend: Arc<dyn LlmBackend> = match config.llm.backend.as_str() {
            "gemini" => Arc::new(GeminiBackend::new(
                sandbox.clone(),
                config.llm_api_key(),
                config.llm.model.clone(),
            )),
            "openai_compatible" => {
                let base_url = config.llm.base_url.clone().ok_or_else(|| {
                    OncoprobeError::Config(
                        "llm.base_url is required for openai_compatible".to_string(),
                    )
                })?;
                Arc::new(OpenAiCompatibleBackend::new(
                    sandbox.clone(),
                    base_url,
                    config.llm.model.clone(),
                    None,
                ))
            }
            other => {
                return Err(OncoprobeError::Config(format!(
                    "unknown llm backend '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            classifier,
            metrics_dir: config.model.metrics_dir.clone(),
            extractor,
            drugbank,
            reporter: RepurposingReporter::new(backend),
            pubchem: PubChemClient::new(sandbox.clone()),
            pubmed: PubMedClient::new(sandbox.clone(), config.evidence.pubmed_api_key.clone()),
            trials: ClinicalTrialsClient::new(sandbox),
            max_evidence: config.evidence.max_results,
        })
    }
}
