//! oncoprobe-evidence — DrugBank ID lookup plus the public biomedical API
//! clients used to corroborate repurposing candidates. Every client is
//! best-effort: a failed call logs a warning upstream and degrades to an
//! empty result, never a request failure.

pub mod clinicaltrials;
pub mod drugbank;
pub mod pubchem;
pub mod pubmed;

use async_trait::async_trait;

pub use clinicaltrials::ClinicalTrialsClient;
pub use drugbank::DrugBankIndex;
pub use pubchem::PubChemClient;
pub use pubmed::PubMedClient;

/// Common interface for the link-producing evidence sources.
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Return up to `max_results` external URLs supporting the drug.
    async fn links_for(&self, drug_name: &str, max_results: usize)
        -> anyhow::Result<Vec<String>>;
}
