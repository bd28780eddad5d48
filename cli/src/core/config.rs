//! # kbchat Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates kbchat's configuration. Settings
//! are combined from several sources so a user can set personal defaults and
//! a project can pin its own knowledge base or answer service.
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the command handlers, not here)
//! 2. Project-specific `.kbchat.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//!    (or the file named by `KBCHAT_CONFIG`)
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [retriever]
//! min_keyword_len = 2
//! policy = "first"
//!
//! [knowledge_base]
//! path = "~/anna.txt"
//!
//! [remote]
//! base_url = "http://127.0.0.1:8000"
//!
//! [server]
//! port = 9000
//! enable_cors = false
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the modules that need it.
//!
use crate::core::error::{KbchatError, Result};
use crate::retrieval::{MatchPolicy, RetrieverConfig};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use reqwest::Url;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the per-project configuration file.
const PROJECT_CONFIG_FILENAME: &str = ".kbchat.toml";

/// Environment variable that overrides the location of the user configuration file.
pub const CONFIG_PATH_ENV: &str = "KBCHAT_CONFIG";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub retriever: RetrieverSettings,
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

/// File-level retriever tuning. Unset values fall back to the built-in defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RetrieverSettings {
    pub min_keyword_len: Option<usize>,
    pub policy: Option<MatchPolicy>,
    pub fallback: Option<String>,
}

impl RetrieverSettings {
    /// Fills every unset value from `RetrieverConfig::default()`.
    pub fn resolve(&self) -> RetrieverConfig {
        let defaults = RetrieverConfig::default();
        RetrieverConfig {
            min_keyword_len: self.min_keyword_len.unwrap_or(defaults.min_keyword_len),
            policy: self.policy.unwrap_or(defaults.policy),
            fallback: self.fallback.clone().unwrap_or(defaults.fallback),
        }
    }
}

/// Where the local corpus comes from.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeBaseConfig {
    /// Path to a UTF-8 text file (can use ~). The built-in paragraph is used when unset.
    pub path: Option<String>,
}

/// Settings for the remote answer source.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the answer service; `/ask` is appended.
    pub base_url: Option<String>,
}

/// File-level settings for `kbchat serve`. Unset values fall back to the CLI defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub enable_cors: Option<bool>,
}

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("com", "KbChat", "kbchat").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_user_config() -> Result<Option<Config>> {
    match user_config_path() {
        Some(config_path) if config_path.is_file() => {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        }
        Some(config_path) => {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
        None => {
            warn!("Could not determine user config directory.");
            Ok(None)
        }
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.kbchat.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.kbchat.toml`, stopping at a repository root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Every value the project file sets wins over the user file.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.retriever.min_keyword_len = project_cfg
        .retriever
        .min_keyword_len
        .or(user.retriever.min_keyword_len);
    merged.retriever.policy = project_cfg.retriever.policy.or(user.retriever.policy);
    merged.retriever.fallback = project_cfg.retriever.fallback.or(user.retriever.fallback);
    merged.knowledge_base.path = project_cfg
        .knowledge_base
        .path
        .or(user.knowledge_base.path);
    merged.remote.base_url = project_cfg.remote.base_url.or(user.remote.base_url);
    merged.server.host = project_cfg.server.host.or(user.server.host);
    merged.server.port = project_cfg.server.port.or(user.server.port);
    merged.server.enable_cors = project_cfg.server.enable_cors.or(user.server.enable_cors);
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(path) = config.knowledge_base.path.as_mut() {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded knowledge base path: {}", path);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config
        .retriever
        .fallback
        .as_deref()
        .is_some_and(|fallback| fallback.trim().is_empty())
    {
        return Err(anyhow!(KbchatError::Config(
            "retriever.fallback cannot be empty.".to_string()
        )));
    }
    if let Some(path) = &config.knowledge_base.path {
        let kb_path = PathBuf::from(path);
        if !kb_path.exists() {
            warn!(
                "Configured knowledge base '{}' does not exist.",
                kb_path.display()
            );
        } else if kb_path.is_dir() {
            return Err(anyhow!(KbchatError::Config(format!(
                "Configured knowledge base '{}' is a directory, expected a text file.",
                kb_path.display()
            ))));
        }
    }
    // A blank base URL means "unset"; the command falls back to the default.
    if let Some(url) = config
        .remote
        .base_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
    {
        validate_base_url(url)?;
    }
    if let Some(host) = &config.server.host {
        if host.parse::<IpAddr>().is_err() {
            return Err(anyhow!(KbchatError::Config(format!(
                "Invalid server host '{}'. Expected an IP address such as 127.0.0.1.",
                host
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

/// Parses `url` and accepts only absolute http(s) URLs with a host.
pub fn validate_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| {
        KbchatError::Config(format!("Invalid base URL '{}': {}", url, e))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(KbchatError::Config(format!(
            "Invalid base URL '{}'. Expected an http:// or https:// URL.",
            url
        ))));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(anyhow!(KbchatError::Config(format!(
            "Invalid base URL '{}'. The URL has no host.",
            url
        ))));
    }
    Ok(parsed)
}
