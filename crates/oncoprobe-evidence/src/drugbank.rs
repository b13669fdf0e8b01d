//! DrugBank target-to-drug mapping.
//!
//! Loaded once at startup from the DrugBank "target links" CSV export,
//! which carries a `UniProt ID` column and a `Drug IDs` column with
//! `; `-separated DrugBank accession numbers.

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use oncoprobe_common::{OncoprobeError, Result};

const UNIPROT_COLUMN: &str = "UniProt ID";
const DRUG_IDS_COLUMN: &str = "Drug IDs";

/// In-memory UniProt ID → DrugBank IDs index.
#[derive(Debug, Clone, Default)]
pub struct DrugBankIndex {
    by_uniprot: HashMap<String, Vec<String>>,
}

impl DrugBankIndex {
    /// Load the index from the DrugBank CSV export.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| OncoprobeError::Csv(format!("{}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| OncoprobeError::Csv(format!("{}: {}", path.display(), e)))?
            .clone();
        let uniprot_idx = headers
            .iter()
            .position(|h| h == UNIPROT_COLUMN)
            .ok_or_else(|| {
                OncoprobeError::Csv(format!("{}: missing '{}' column", path.display(), UNIPROT_COLUMN))
            })?;
        let drugs_idx = headers
            .iter()
            .position(|h| h == DRUG_IDS_COLUMN)
            .ok_or_else(|| {
                OncoprobeError::Csv(format!("{}: missing '{}' column", path.display(), DRUG_IDS_COLUMN))
            })?;

        let mut by_uniprot = HashMap::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| OncoprobeError::Csv(format!("{}: {}", path.display(), e)))?;
            let uniprot = record.get(uniprot_idx).unwrap_or("").trim();
            let drugs = record.get(drugs_idx).unwrap_or("").trim();
            if uniprot.is_empty() || drugs.is_empty() {
                continue;
            }
            let ids: Vec<String> = drugs
                .split("; ")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !ids.is_empty() {
                by_uniprot.insert(uniprot.to_string(), ids);
            }
        }

        info!(targets = by_uniprot.len(), path = %path.display(), "DrugBank index loaded");
        Ok(Self { by_uniprot })
    }

    /// Exact-match lookup of DrugBank IDs for a UniProt accession.
    pub fn drug_ids(&self, uniprot_id: &str) -> Option<&[String]> {
        self.by_uniprot.get(uniprot_id).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.by_uniprot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uniprot.is_empty()
    }
}
