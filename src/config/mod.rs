pub mod cli;

pub use self::cli::CliConfig;

use crate::core::prompt::PromptOptions;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 8080;

/// Resolved process configuration: CLI flags merged with environment and the
/// optional prompt-options file. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub provider_url: String,
    pub api_key: String,
    pub prompt: PromptOptions,
    pub verbose: bool,
    pub log_json: bool,
}

/// On-disk shape of the prompt-options file. Every field is optional and
/// merged over the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptFileConfig {
    pub prompt: Option<PromptOverrides>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptOverrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl PromptFileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GatewayError::ConfigError {
            message: format!("Failed to parse prompt config: {}", e),
        })
    }

    pub fn apply_to(&self, mut options: PromptOptions) -> PromptOptions {
        if let Some(overrides) = &self.prompt {
            if let Some(model) = &overrides.model {
                options.model = model.clone();
            }
            if let Some(temperature) = overrides.temperature {
                options.temperature = temperature;
            }
            if let Some(max_tokens) = overrides.max_tokens {
                options.max_tokens = max_tokens;
            }
            if let Some(system_prompt) = &overrides.system_prompt {
                options.system_prompt = Some(system_prompt.clone());
            }
        }
        options
    }
}

impl AppConfig {
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let port = cli
            .port
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT);

        // An absent key is not fatal here; it surfaces as a provider 401.
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set; provider calls will fail");
        }

        let mut prompt = PromptOptions::default();
        if let Some(path) = &cli.prompt_config {
            prompt = PromptFileConfig::from_file(path)?.apply_to(prompt);
            tracing::info!("Loaded prompt options from {}", path);
        }

        Ok(Self {
            port,
            provider_url: cli.provider_url.clone(),
            api_key,
            prompt,
            verbose: cli.verbose,
            log_json: cli.log_json,
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("provider_url", &self.provider_url)?;
        validate_non_empty_string("model", &self.prompt.model)?;
        validate_range("temperature", self.prompt.temperature, 0.0, 2.0)?;
        validate_range("max_tokens", self.prompt.max_tokens, 1, 4096)?;
        if self.port == 0 {
            return Err(GatewayError::InvalidConfigValueError {
                field: "port".to_string(),
                value: self.port.to_string(),
                reason: "Port must be nonzero".to_string(),
            });
        }
        Ok(())
    }
}
