//! PubChem PUG REST client.
//!
//! Endpoint: https://pubchem.ncbi.nlm.nih.gov/rest/pug
//! Used to resolve a drug name into its compound CID plus the compound
//! property entries (urn/value pairs) the client renders as a property
//! table.

use tracing::{debug, instrument};
use url::Url;

use oncoprobe_common::sandbox::SandboxClient;
use oncoprobe_common::PubChemRecord;

const PUG_REST_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

pub struct PubChemClient {
    client: SandboxClient,
    base_url: String,
}

impl PubChemClient {
    pub fn new(client: SandboxClient) -> Self {
        Self { client, base_url: PUG_REST_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the full compound record for a drug name.
    /// Returns None when PubChem has no compound under that name.
    #[instrument(skip(self))]
    pub async fn fetch_compound(&self, name: &str) -> anyhow::Result<Option<PubChemRecord>> {
        let mut url = Url::parse(&format!("{}/", self.base_url.trim_end_matches('/')))?;
        // path_segments_mut percent-encodes the drug name for us
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("PubChem base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["compound", "name", name, "JSON"]);

        let resp = self.client.get(url.as_str())?.send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(name, "no PubChem compound for drug name");
            return Ok(None);
        }
        let json: serde_json::Value = resp.error_for_status()?.json().await?;

        let Some(compound) = json["PC_Compounds"].as_array().and_then(|c| c.first()) else {
            return Ok(None);
        };
        let Some(cid) = compound["id"]["id"]["cid"].as_i64() else {
            return Ok(None);
        };
        let synonyms = compound["props"].as_array().cloned().unwrap_or_default();

        debug!(name, cid, props = synonyms.len(), "PubChem compound resolved");
        Ok(Some(PubChemRecord { cid, synonyms }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> PubChemClient {
        PubChemClient::new(SandboxClient::new().unwrap()).with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn test_fetch_compound_resolves_cid_and_props() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/compound/name/aspirin/JSON");
            then.status(200).json_body(serde_json::json!({
                "PC_Compounds": [{
                    "id": { "id": { "cid": 2244 } },
                    "props": [
                        { "urn": { "label": "Molecular Weight" }, "value": { "sval": "180.16" } }
                    ]
                }]
            }));
        });

        let record = client(&server).fetch_compound("aspirin").await.unwrap().unwrap();
        mock.assert();
        assert_eq!(record.cid, 2244);
        assert_eq!(record.synonyms.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_compound_encodes_spaces() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/compound/name/valproic%20acid/JSON");
            then.status(200).json_body(serde_json::json!({
                "PC_Compounds": [{ "id": { "id": { "cid": 3121 } } }]
            }));
        });

        let record = client(&server).fetch_compound("valproic acid").await.unwrap().unwrap();
        mock.assert();
        assert_eq!(record.cid, 3121);
        assert!(record.synonyms.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_name_yields_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404).json_body(serde_json::json!({
                "Fault": { "Code": "PUGREST.NotFound" }
            }));
        });

        let record = client(&server).fetch_compound("no-such-drug").await.unwrap();
        assert!(record.is_none());
    }
}
