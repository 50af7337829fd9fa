//! Configuration loading, validation, and management for Turnstone.
//!
//! A [`TurnConfig`] describes how turns for one agent are composed: which
//! tool providers are requested by default, which prompt templates the base
//! and built-in prompts render from, and whether prompt renders are
//! registered with a correlation backend. Loaded from a TOML file with
//! environment variable overrides; validated on load.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable that overrides the configured agent name.
pub const AGENT_NAME_ENV: &str = "TURNSTONE_AGENT_NAME";

/// The root turn configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnConfig {
    /// Display name of the agent, substituted into prompt templates.
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Provider names requested for a turn when the caller passes none.
    #[serde(default)]
    pub providers: Vec<String>,

    /// Prompt template configuration.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Rendering-correlation backend configuration.
    #[serde(default)]
    pub correlation: CorrelationConfig,
}

fn default_agent_name() -> String {
    "Turnstone".into()
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            providers: vec![],
            prompt: PromptConfig::default(),
            correlation: CorrelationConfig::default(),
        }
    }
}

/// Prompt template settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Template for the provider-agnostic base system prompt.
    #[serde(default = "default_base_template")]
    pub base_template: String,

    /// Template for the built-in provider's complete prompt. When unset,
    /// the built-in provider falls back to its hardcoded default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin_template: Option<String>,
}

fn default_base_template() -> String {
    concat!(
        "You are {agent_name}, a helpful assistant. ",
        "Answer the user's questions truthfully and concisely. ",
        "The user you are speaking with is {user_name}.",
    )
    .into()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            base_template: default_base_template(),
            builtin_template: None,
        }
    }
}

/// Rendering-correlation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Whether prompt renders are registered with the correlation backend.
    #[serde(default)]
    pub enabled: bool,

    /// Label prefix used when registering prompts.
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
}

fn default_label_prefix() -> String {
    "turnstone".into()
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            label_prefix: default_label_prefix(),
        }
    }
}

impl TurnConfig {
    /// Load configuration from a TOML file, apply environment overrides,
    /// and validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            let mut config = Self::default();
            config.apply_env_overrides();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var(AGENT_NAME_ENV) {
            self.agent_name = name;
        }
    }

    /// Check invariants the composition engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agent_name must not be empty".into(),
            ));
        }
        if self.prompt.base_template.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "prompt.base_template must not be empty".into(),
            ));
        }
        if let Some(template) = &self.prompt.builtin_template {
            if template.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "prompt.builtin_template must not be empty when set".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}
