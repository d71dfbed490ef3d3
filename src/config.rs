//! Configuration for CLI context defaults.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags, which also read VOXPENSE_ACCOUNT / VOXPENSE_TYPE (clap env)
//! 2. Config file (.voxpense/config.yaml)
//!
//! Config file discovery:
//! - Searches the current directory and parents for .voxpense/config.yaml
//! - Falls back to ~/.voxpense/config.yaml
//!
//! Only the CLI reads configuration. The library pipeline takes explicit
//! arguments and never consults it, so absent defaults simply mean the
//! sentence must carry the field itself.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::{AccountTag, TransactionType};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Account tag, e.g. "SG"
    pub account: Option<String>,
    /// Transaction type, e.g. "EXPENSE"
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// Resolved configuration with typed values
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Default account for sentences that name none
    pub default_account: Option<AccountTag>,
    /// Default type for labels that imply none
    pub default_type: Option<TransactionType>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching the current directory and parents, then
/// the home directory.
fn find_config_file() -> Option<PathBuf> {
    if let Some(found) = std::env::current_dir()
        .ok()
        .and_then(|dir| find_config_file_from(&dir))
    {
        return Some(found);
    }

    let home = dirs::home_dir()?.join(".voxpense").join("config.yaml");
    home.exists().then_some(home)
}

fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".voxpense").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Turn the raw file schema into typed values. Unknown tokens are load
/// errors, not silent Nones.
fn resolve(config: ConfigFile, path: PathBuf) -> Result<ResolvedConfig> {
    let default_account = config
        .defaults
        .account
        .as_deref()
        .map(|token| {
            AccountTag::from_token(token)
                .with_context(|| format!("unknown account '{token}' in {}", path.display()))
        })
        .transpose()?;

    let default_type = config
        .defaults
        .transaction_type
        .as_deref()
        .map(|token| {
            TransactionType::from_token(token)
                .with_context(|| format!("unknown type '{token}' in {}", path.display()))
        })
        .transpose()?;

    Ok(ResolvedConfig {
        default_account,
        default_type,
        config_file: Some(path),
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    match find_config_file() {
        Some(config_path) => {
            let config = load_config_file(&config_path)?;
            resolve(config, config_path)
        }
        None => Ok(ResolvedConfig::default()),
    }
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
