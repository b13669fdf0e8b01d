//! Drug-repurposing report generation.
//!
//! The reporter prompts the generative backend with a list of DrugBank IDs
//! and expects a markdown reply carrying one fenced ```json block with an
//! array of drug records. Trailing text after the fence, typically a
//! medical disclaimer, is surfaced separately.

use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use oncoprobe_common::{DrugReport, OncoprobeError, Result};
use crate::backend::LlmBackend;

/// One drug entry as emitted by the model inside the JSON block.
#[derive(Debug, Clone, Deserialize)]
struct ReportedDrug {
    #[serde(rename = "drugId")]
    drug_id: String,
    name: String,
    description: String,
    #[serde(default)]
    evidence: Vec<String>,
}

/// Parsed reporter output.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub drugs: Vec<DrugReport>,
    pub disclaimer: Option<String>,
}

pub struct RepurposingReporter {
    backend: Arc<dyn LlmBackend>,
    json_block: Regex,
}

impl RepurposingReporter {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend,
            // (?s) so the block body may span lines
            json_block: Regex::new(r"(?s)```json\s*\n(.*?)\n```").expect("static regex"),
        }
    }

    /// Build the repurposing prompt for a set of DrugBank IDs.
    pub fn build_prompt(drug_ids: &[String]) -> String {
        format!(
            "For the following DrugBank IDs: {}, provide:\n\
             - Drug name\n\
             - A short description of its function\n\
             - Any known evidence or peer-reviewed articles supporting its potential use \
             in cancer drug repurposing (include links if available)\n\n\
             Respond in JSON format like this:\n\
             [\n\
             {{\n\
               \"drugId\": \"DB0001\",\n\
               \"name\": \"ExampleName\",\n\
               \"description\": \"Short description...\",\n\
               \"evidence\": [\"https://link1.com\", \"https://link2.com\"]\n\
             }},\n\
             ...\n\
             ]",
            drug_ids.join(", ")
        )
    }

    /// Generate and parse the report for the given DrugBank IDs.
    #[instrument(skip(self))]
    pub async fn generate(&self, drug_ids: &[String]) -> Result<ParsedReport> {
        let prompt = Self::build_prompt(drug_ids);
        let completion = self
            .backend
            .complete(&prompt)
            .await
            .map_err(|e| OncoprobeError::Report(e.to_string()))?;

        debug!(model = completion.model, chars = completion.text.len(), "report completion received");
        self.parse(&completion.text)
    }

    /// Extract and deserialize the fenced JSON block; anything after the
    /// closing fence becomes the disclaimer.
    pub fn parse(&self, markdown: &str) -> Result<ParsedReport> {
        let captures = self.json_block.captures(markdown).ok_or_else(|| {
            OncoprobeError::Report("no JSON block found in model response".to_string())
        })?;

        let raw = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let reported: Vec<ReportedDrug> = serde_json::from_str(raw)
            .map_err(|e| OncoprobeError::Report(format!("malformed JSON block: {}", e)))?;

        let block_end = captures.get(0).map(|m| m.end()).unwrap_or(markdown.len());
        let disclaimer = {
            let tail = markdown[block_end..].trim();
            (!tail.is_empty()).then(|| tail.to_string())
        };

        let drugs = reported
            .into_iter()
            .map(|d| DrugReport {
                drug_id: d.drug_id,
                name: d.name,
                description: d.description,
                evidence: d.evidence,
                clinical_trials: Vec::new(),
                pubmed_articles: Vec::new(),
                pubchem: None,
            })
            .collect();

        Ok(ParsedReport { drugs, disclaimer })
    }
}
