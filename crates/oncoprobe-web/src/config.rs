//! Configuration loading for Oncoprobe.
//! Reads oncoprobe.toml from the current directory or the path in the
//! ONCOPROBE_CONFIG env var. API keys may come from the environment
//! instead of the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use oncoprobe_common::{OncoprobeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub extractor: ExtractorConfig,
    pub drugbank: DrugBankConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub evidence: EvidenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS origin forwarded to the browser client; "*" means permissive.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }
fn default_cors_origin() -> String { "*".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the classifier JSON artifact.
    pub artifact: PathBuf,
    /// Directory holding metrics.json and the evaluation plot PNGs.
    pub metrics_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub program: PathBuf,
    #[serde(default = "default_extractor_args")]
    pub args: Vec<String>,
}

fn default_extractor_args() -> Vec<String> {
    vec!["{fasta}".to_string(), "{outdir}".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugBankConfig {
    /// DrugBank target-links CSV export.
    pub csv_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "openai_compatible"
    #[serde(default = "default_llm_backend")]
    pub backend: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Falls back to ONCOPROBE_GEMINI_API_KEY when empty.
    #[serde(default)]
    pub api_key: String,
    /// Base URL for openai_compatible backends.
    pub base_url: Option<String>,
}

fn default_llm_backend() -> String { "gemini".to_string() }
fn default_llm_model() -> String { "gemini-1.5-flash".to_string() }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: default_llm_backend(),
            model: default_llm_model(),
            api_key: String::new(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    pub pubmed_api_key: Option<String>,
}

fn default_max_results() -> usize { 5 }

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self { max_results: default_max_results(), pubmed_api_key: None }
    }
}

impl Config {
    /// Load from ONCOPROBE_CONFIG or ./oncoprobe.toml.
    pub fn load() -> Result<Self> {
        let path = std::env::var("ONCOPROBE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("oncoprobe.toml"));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OncoprobeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| OncoprobeError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Resolve the generative API key: config value first, then env.
    pub fn llm_api_key(&self) -> String {
        if !self.llm.api_key.is_empty() {
            return self.llm.api_key.clone();
        }
        std::env::var("ONCOPROBE_GEMINI_API_KEY").unwrap_or_default()
    }
}
