/// Request-scoped records exchanged between the pipeline stages and the
/// web layer. Field names mirror the wire format consumed by the client.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Binary classifier output label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLabel {
    #[serde(rename = "POSITIVE")]
    Positive,
    #[serde(rename = "NEGATIVE")]
    Negative,
}

impl PredictionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionLabel::Positive => "POSITIVE",
            PredictionLabel::Negative => "NEGATIVE",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, PredictionLabel::Positive)
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Drug repurposing report
// ---------------------------------------------------------------------------

/// PubChem compound record attached to a drug: the CID plus the raw
/// property entries (urn/value pairs) from the PUG REST compound record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubChemRecord {
    pub cid: i64,
    pub synonyms: Vec<serde_json::Value>,
}

/// One repurposing candidate, LLM-described and API-enriched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugReport {
    #[serde(rename = "drugId")]
    pub drug_id: String,
    pub name: String,
    pub description: String,
    /// Evidence links cited by the LLM report.
    #[serde(default)]
    pub evidence: Vec<String>,
    /// ClinicalTrials.gov study URLs.
    #[serde(default)]
    pub clinical_trials: Vec<String>,
    /// PubMed article URLs.
    #[serde(default)]
    pub pubmed_articles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubchem: Option<PubChemRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_to_uppercase() {
        let json = serde_json::to_string(&PredictionLabel::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
        assert_eq!(PredictionLabel::Negative.to_string(), "NEGATIVE");
    }

    #[test]
    fn test_drug_report_wire_names() {
        let report = DrugReport {
            drug_id: "DB00945".to_string(),
            name: "Aspirin".to_string(),
            description: "COX inhibitor".to_string(),
            evidence: vec!["https://example.org/1".to_string()],
            clinical_trials: vec![],
            pubmed_articles: vec![],
            pubchem: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["drugId"], "DB00945");
        assert!(json.get("pubchem").is_none());
    }
}
