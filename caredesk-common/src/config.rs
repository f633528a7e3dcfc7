//! Configuration loading and config file resolution.
//!
//! The config file is resolved by priority order:
//! 1. Command-line argument (highest priority)
//! 2. `CAREDESK_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/caredesk/caredesk.toml`)
//! 4. `./caredesk.toml` in the working directory (fallback)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

pub const CONFIG_ENV_VAR: &str = "CAREDESK_CONFIG";
const CONFIG_FILE_NAME: &str = "caredesk.toml";

/// Full application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub kobo: KoboConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP server binding.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5760
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// KoboToolbox forms API access.
#[derive(Debug, Clone, Deserialize)]
pub struct KoboConfig {
    pub base_url: String,
    pub api_token: String,
    /// Form holding the complaint registration stream (stream A).
    pub registration_form_id: String,
    /// Form holding the follow-up / technician visit stream (stream B).
    pub followup_form_id: String,
}

/// Identity handling for the technician pre-constraint.
///
/// Identities arrive from the external session shell; users listed here
/// see every technician's complaints, everyone else is constrained to
/// their own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub admin_users: Vec<String>,
}

/// Resolve the config file path by the documented priority order.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    // Priority 3: Platform config directory
    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("caredesk").join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return candidate;
        }
    }

    // Priority 4: Working directory fallback
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load and parse the configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}
