use thiserror::Error;

#[derive(Debug, Error)]
pub enum OncoprobeError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Invalid UniProt ID: {0}")]
    InvalidAccession(String),

    #[error("Feature column '{0}' missing from input")]
    MissingFeature(String),

    #[error("Feature extraction error: {0}")]
    Extraction(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OncoprobeError>;
