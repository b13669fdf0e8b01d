//! PubMed E-utilities client.
//!
//! Endpoint used:
//!   esearch: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!
//! The detect pipeline only needs article links, so the client searches
//! `"<drug> AND cancer"` and maps the returned PMIDs to pubmed.ncbi URLs.

use async_trait::async_trait;
use tracing::{debug, instrument};

use oncoprobe_common::sandbox::SandboxClient;
use super::EvidenceSource;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const ARTICLE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

pub struct PubMedClient {
    client: SandboxClient,
    esearch_url: String,
    api_key: Option<String>,
}

impl PubMedClient {
    pub fn new(client: SandboxClient, api_key: Option<String>) -> Self {
        Self { client, esearch_url: ESEARCH_URL.to_string(), api_key }
    }

    pub fn with_esearch_url(mut self, url: impl Into<String>) -> Self {
        self.esearch_url = url.into();
        self
    }

    /// Search PubMed and return a list of PMIDs.
    #[instrument(skip(self))]
    async fn esearch(&self, query: &str, max: usize) -> anyhow::Result<Vec<String>> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", query.to_string()),
            ("retmax", max.to_string()),
            ("retmode", "json".to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let resp: serde_json::Value = self
            .client
            .get(&self.esearch_url)?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ids: Vec<String> = resp["esearchresult"]["idlist"]
            .as_array()
            .unwrap_or(&vec![])
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();

        debug!(?ids, "PubMed esearch returned PMIDs");
        Ok(ids)
    }
}

#[async_trait]
impl EvidenceSource for PubMedClient {
    async fn links_for(&self, drug_name: &str, max_results: usize) -> anyhow::Result<Vec<String>> {
        let query = format!("{} AND cancer", drug_name);
        let pmids = self.esearch(&query, max_results).await?;
        Ok(pmids
            .iter()
            .map(|pmid| format!("{}/{}/", ARTICLE_URL, pmid))
            .collect())
    }
}
