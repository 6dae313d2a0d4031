//! Application configuration with documented defaults
//!
//! Loaded from an optional TOML file. Credentials never live here: the
//! config only names the environment variable that holds the API key.

use crate::core::error::{Result, TaskAiError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "taskai.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub snapshot: SnapshotConfig,
    pub termination: TerminationConfig,
}

/// Model client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Endpoint URL; the wire format is detected from the host
    pub api_url: String,
    /// Model name sent to OpenAI/Anthropic style endpoints
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    ///
    /// The only suspension point of a run is the model call. When it
    /// expires the run ends with an interpreter failure.
    pub timeout_secs: u64,
    /// Upper bound on reply tokens
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent".into(),
            model: "gemini-2.5-flash".into(),
            api_key_env: "LLM_API_KEY".into(),
            timeout_secs: 60,
            max_tokens: 8192,
        }
    }
}

/// Process summary settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Number of process groups (ranked by memory) shown to the model
    pub max_groups: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { max_groups: 50 }
    }
}

/// Termination settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TerminationConfig {
    /// Ask processes to exit (SIGTERM) instead of killing them outright
    ///
    /// Falls back to a forced kill on platforms without polite termination.
    pub graceful: bool,
}

impl AppConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TaskAiError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, else `taskai.toml` if present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `LLM_API_URL` / `LLM_MODEL` overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("LLM_API_URL").ok(),
            std::env::var("LLM_MODEL").ok(),
        );
    }

    fn apply_overrides(&mut self, api_url: Option<String>, model: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.llm.api_url = url;
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.llm.model = model;
        }
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| TaskAiError::Config(format!("{} not set", self.llm.api_key_env)))
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_url.trim().is_empty() {
            return Err(TaskAiError::Config("llm.api_url must not be empty".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(TaskAiError::Config("llm.timeout_secs must be positive".into()));
        }
        if self.snapshot.max_groups == 0 {
            return Err(TaskAiError::Config("snapshot.max_groups must be positive".into()));
        }
        Ok(())
    }
}
