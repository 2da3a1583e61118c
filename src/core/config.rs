//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.agixt-chat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub connection: ConnectionSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConnectionSection {
    pub base_uri: Option<String>,
    pub api_key: Option<String>,
    /// Check the connection as soon as the UI starts.
    pub auto_connect: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionSection {
    pub agent_name: Option<String>,
    pub conversation_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URI: &str = "http://localhost:7437";
pub const DEFAULT_AGENT_NAME: &str = "gpt4free";
pub const DEFAULT_CONVERSATION_NAME: &str = "My Conversation";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_uri: String,
    pub api_key: String,
    pub agent_name: String,
    pub conversation_name: String,
    pub auto_connect: bool,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_uri: Option<String>,
    pub api_key: Option<String>,
    pub agent_name: Option<String>,
    pub conversation_name: Option<String>,
    pub connect: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.agixt-chat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".agixt-chat").join("config.toml"))
}

/// Load config from `~/.agixt-chat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ChatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ChatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // api_key stays out of the log
    debug!(
        "Config: base_uri={:?}, agent={:?}, conversation={:?}",
        config.connection.base_uri, config.session.agent_name, config.session.conversation_name
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# agixt-chat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [connection]
# base_uri = "http://localhost:7437"   # Or set AGIXT_URI env var
# api_key = "..."                      # Or set AGIXT_API_KEY env var
# auto_connect = false                 # Same as --connect

# [session]
# agent_name = "gpt4free"              # Or set AGIXT_AGENT env var
# conversation_name = "My Conversation" # Or set AGIXT_CONVERSATION env var
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment supplied by `env`.
pub fn resolve_with_env(
    config: &ChatConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URI: CLI → env → config → default
    let base_uri = cli
        .base_uri
        .clone()
        .or_else(|| env("AGIXT_URI"))
        .or_else(|| config.connection.base_uri.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URI.to_string());

    // API key: CLI → env → config → empty
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| env("AGIXT_API_KEY"))
        .or_else(|| config.connection.api_key.clone())
        .unwrap_or_default();

    let agent_name = cli
        .agent_name
        .clone()
        .or_else(|| env("AGIXT_AGENT"))
        .or_else(|| config.session.agent_name.clone())
        .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string());

    let conversation_name = cli
        .conversation_name
        .clone()
        .or_else(|| env("AGIXT_CONVERSATION"))
        .or_else(|| config.session.conversation_name.clone())
        .unwrap_or_else(|| DEFAULT_CONVERSATION_NAME.to_string());

    ResolvedConfig {
        base_uri,
        api_key,
        agent_name,
        conversation_name,
        auto_connect: cli.connect || config.connection.auto_connect.unwrap_or(false),
    }
}
