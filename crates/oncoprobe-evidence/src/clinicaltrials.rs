//! ClinicalTrials.gov v2 API client.
//!
//! API docs: https://clinicaltrials.gov/data-api/api
//! Endpoint: https://clinicaltrials.gov/api/v2/studies
//!
//! Searches studies by intervention term and maps the NCT IDs to study
//! detail URLs.

use async_trait::async_trait;
use tracing::{debug, instrument};

use oncoprobe_common::sandbox::SandboxClient;
use super::EvidenceSource;

const CT_API_URL: &str = "https://clinicaltrials.gov/api/v2/studies";
const CT_STUDY_URL: &str = "https://clinicaltrials.gov/study";

pub struct ClinicalTrialsClient {
    client: SandboxClient,
    api_url: String,
}

impl ClinicalTrialsClient {
    pub fn new(client: SandboxClient) -> Self {
        Self { client, api_url: CT_API_URL.to_string() }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[instrument(skip(self))]
    async fn search_studies(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<serde_json::Value>> {
        let resp: serde_json::Value = self
            .client
            .get(&self.api_url)?
            .query(&[
                ("query.intr", query),
                ("pageSize", &max_results.to_string()),
                ("format", "json"),
                ("fields", "NCTId,BriefTitle,OverallStatus"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp["studies"].as_array().cloned().unwrap_or_default())
    }
}

#[async_trait]
impl EvidenceSource for ClinicalTrialsClient {
    async fn links_for(&self, drug_name: &str, max_results: usize) -> anyhow::Result<Vec<String>> {
        let studies = self.search_studies(drug_name, max_results).await?;
        debug!(n = studies.len(), "ClinicalTrials.gov studies retrieved");

        Ok(studies
            .iter()
            .filter_map(|s| {
                s["protocolSection"]["identificationModule"]["nctId"]
                    .as_str()
                    .map(|nct| format!("{}/{}", CT_STUDY_URL, nct))
            })
            .collect())
    }
}
