//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.keyscout/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Provider;
use crate::core::prompt::DEFAULT_LANGUAGE;
use crate::leads::formspree::DEFAULT_FORMSPREE_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeyscoutConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub leads: LeadsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LeadsConfig {
    pub form_id: Option<String>,
    pub base_url: Option<String>,
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub form_id: Option<String>,
}

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub language: String,
    pub max_output_tokens: u32,
    pub chat_api_key: Option<String>,
    pub chat_base_url: String,
    pub form_id: String,
    pub leads_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A setting has a value we can't use.
    Invalid(String),
    /// A setting with no usable default was not provided anywhere.
    Missing(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Missing(msg) => write!(f, "missing config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.keyscout/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".keyscout").join("config.toml"))
}

/// Load config from `~/.keyscout/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KeyscoutConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KeyscoutConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KeyscoutConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(KeyscoutConfig::default());
    }

    let config = load_config_from(&path)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<KeyscoutConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: KeyscoutConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Keyscout Configuration
# Settings below are optional unless marked required.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# provider = "openrouter"            # "openai", "openrouter" or "lmstudio"
# model = "openai/gpt-4o-mini"
# language = "Finnish"               # language the report is written in
# max_output_tokens = 4096

# [chat]
# api_key = "sk-..."                 # Or CHAT_API_KEY / OPENAI_API_KEY / OPENROUTER_API_KEY
# base_url = "https://openrouter.ai/api/v1"

# [leads]
# form_id = "abcdwxyz"               # required, or FORMSPREE_FORM_ID
# base_url = "https://formspree.io"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &KeyscoutConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with(
    config: &KeyscoutConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Provider: CLI → env → config → default
    let provider = match cli.provider {
        Some(p) => p,
        None => match env("KEYSCOUT_PROVIDER").or_else(|| config.general.provider.clone()) {
            Some(name) => Provider::from_str(&name, true)
                .map_err(|_| ConfigError::Invalid(format!("unknown provider '{name}'")))?,
            None => Provider::default(),
        },
    };

    // Model: CLI → env → config → provider default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env("KEYSCOUT_MODEL"))
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| provider.default_model().to_string());

    let language = env("KEYSCOUT_LANGUAGE")
        .or_else(|| config.general.language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    // API key: generic env → provider env → config
    let chat_api_key = env("CHAT_API_KEY")
        .or_else(|| provider.api_key_env().and_then(&env))
        .or_else(|| config.chat.api_key.clone())
        .filter(|key| !key.trim().is_empty());

    if provider.requires_api_key() && chat_api_key.is_none() {
        return Err(ConfigError::Missing(format!(
            "{} needs an API key (config [chat] api_key, CHAT_API_KEY or {})",
            provider.name(),
            provider.api_key_env().unwrap_or("CHAT_API_KEY")
        )));
    }

    let chat_base_url = env("CHAT_BASE_URL")
        .or_else(|| config.chat.base_url.clone())
        .unwrap_or_else(|| provider.default_base_url().to_string());

    // Form id: CLI → env → config, no default
    let form_id = cli
        .form_id
        .clone()
        .or_else(|| env("FORMSPREE_FORM_ID"))
        .or_else(|| config.leads.form_id.clone())
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            ConfigError::Missing(
                "form id (config [leads] form_id, FORMSPREE_FORM_ID or --form-id)".to_string(),
            )
        })?;

    let leads_base_url = env("FORMSPREE_BASE_URL")
        .or_else(|| config.leads.base_url.clone())
        .unwrap_or_else(|| DEFAULT_FORMSPREE_BASE_URL.to_string());

    Ok(ResolvedConfig {
        provider,
        model_name,
        language,
        max_output_tokens: config
            .general
            .max_output_tokens
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        chat_api_key,
        chat_base_url,
        form_id,
        leads_base_url,
    })
}
