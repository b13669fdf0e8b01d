use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::OncoprobeError;

/// An allowlist-capped HTTP client. Every outbound request made by the
/// evidence and LLM clients goes through this wrapper, so the service can
/// only ever talk to the biomedical APIs it was built for.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default Oncoprobe allowlist.
    pub fn new() -> Result<Self, OncoprobeError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "pubchem.ncbi.nlm.nih.gov",            // PubChem PUG REST
            "eutils.ncbi.nlm.nih.gov",             // PubMed E-utilities
            "clinicaltrials.gov",                  // ClinicalTrials.gov v2
            "generativelanguage.googleapis.com",   // Gemini
            "localhost",                           // local backends, tests
            "127.0.0.1",                           // localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| OncoprobeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, OncoprobeError> {
        if !self.is_allowed(url) {
            return Err(OncoprobeError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }
        Ok(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, OncoprobeError> {
        if !self.is_allowed(url) {
            return Err(OncoprobeError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }
        Ok(self.client.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowlist_covers_bio_apis() {
        let c = SandboxClient::new().unwrap();
        assert!(c.is_allowed("https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/aspirin/JSON"));
        assert!(c.is_allowed("https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"));
        assert!(c.is_allowed("https://clinicaltrials.gov/api/v2/studies"));
        assert!(!c.is_allowed("https://example.com/"));
    }

    #[test]
    fn test_blocked_domain_errors() {
        let c = SandboxClient::new().unwrap();
        assert!(c.get("https://example.com/").is_err());
    }

    #[test]
    fn test_allow_domain_extends_policy() {
        let mut c = SandboxClient::new().unwrap();
        assert!(!c.is_allowed("https://api.example.org/v1"));
        c.allow_domain("api.example.org");
        assert!(c.is_allowed("https://api.example.org/v1"));
    }
}
