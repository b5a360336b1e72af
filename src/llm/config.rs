use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "deepseek-coder:latest";
pub const DEFAULT_API_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_PAPER_CHARS: usize = 15_000;

/// Configuration for the Ollama-backed LLM service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama model tag (e.g., "deepseek-coder:latest", "llama3:8b")
    pub model: String,

    /// Full URL of the `/api/generate` endpoint
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature (0.0-2.0). `None` leaves the server default.
    pub temperature: Option<f32>,

    /// Top-k sampling cutoff. `None` leaves the server default.
    pub top_k: Option<u32>,

    /// Nucleus sampling probability (0.0-1.0). `None` leaves the server default.
    pub top_p: Option<f32>,

    /// Paper length (in characters) above which a warning is logged
    pub max_paper_chars: usize,

    /// Enable debug logging of request/response details
    pub debug: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: None,
            top_k: None,
            top_p: None,
            max_paper_chars: DEFAULT_MAX_PAPER_CHARS,
            debug: false,
        }
    }
}

/// Values supplied on the command line. Any `Some` field wins over the
/// environment and `.env` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingOverrides {
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
}

impl LlmConfig {
    /// Load configuration from environment variables, reading `.env` first
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_env_internal()
    }

    /// Load configuration from the process environment only
    #[cfg(test)]
    fn from_env_no_dotenv() -> Self {
        Self::from_env_internal()
    }

    fn from_env_internal() -> Self {
        let mut config = Self::default();

        if let Ok(model) = env::var("OLLAMA_MODEL") {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }

        if let Ok(api_url) = env::var("OLLAMA_API_URL") {
            if !api_url.trim().is_empty() {
                config.api_url = api_url.trim().to_string();
            }
        }

        if let Ok(timeout) = env::var("OLLAMA_TIMEOUT") {
            if let Ok(timeout_secs) = timeout.trim().parse::<u64>() {
                config.timeout_secs = timeout_secs;
            }
        }

        if let Ok(temperature) = env::var("OLLAMA_TEMPERATURE") {
            if let Ok(temp) = temperature.trim().parse::<f32>() {
                if (0.0..=2.0).contains(&temp) {
                    config.temperature = Some(temp);
                }
            }
        }

        if let Ok(top_k) = env::var("OLLAMA_TOP_K") {
            if let Ok(k) = top_k.trim().parse::<u32>() {
                if k > 0 {
                    config.top_k = Some(k);
                }
            }
        }

        if let Ok(top_p) = env::var("OLLAMA_TOP_P") {
            if let Ok(p) = top_p.trim().parse::<f32>() {
                if (0.0..=1.0).contains(&p) {
                    config.top_p = Some(p);
                }
            }
        }

        if let Ok(threshold) = env::var("MAX_PAPER_LENGTH_WARN_THRESHOLD") {
            if let Ok(chars) = threshold.trim().parse::<usize>() {
                config.max_paper_chars = chars;
            }
        }

        if let Ok(debug) = env::var("LLM_DEBUG") {
            config.debug = debug.to_lowercase() == "true" || debug == "1";
        }

        config
    }

    /// Apply command-line values on top of this configuration
    pub fn with_overrides(mut self, overrides: &SamplingOverrides) -> Self {
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(api_url) = &overrides.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if overrides.temperature.is_some() {
            self.temperature = overrides.temperature;
        }
        if overrides.top_k.is_some() {
            self.top_k = overrides.top_k;
        }
        if overrides.top_p.is_some() {
            self.top_p = overrides.top_p;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name is empty".to_string());
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if let Some(temp) = self.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(format!("Temperature must be between 0.0 and 2.0, got {}", temp));
            }
        }

        if let Some(p) = self.top_p {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("Top-p must be between 0.0 and 1.0, got {}", p));
            }
        }

        if self.top_k == Some(0) {
            return Err("Top-k must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Candidate `.env` locations, in lookup order
pub fn dotenv_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("peersight").join(".env"));
    }
    candidates
}

/// Load the first `.env` file found. Returns its path, if any.
///
/// Variables already present in the process environment are never replaced.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv_candidates()
        .into_iter()
        .find(|path| path.is_file() && dotenv::from_path(path).is_ok())
}
