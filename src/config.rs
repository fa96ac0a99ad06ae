use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DeployError, Result};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "deploypush.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".deploypush.toml";

/// Represents the complete configuration for deploy-push.
///
/// Contains the push target, commit message defaults, deployment platform guidance and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub platform: PlatformConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_label() -> String {
    "Update".to_string()
}

fn default_platform_name() -> String {
    "Railway".to_string()
}

fn default_dashboard_url() -> String {
    "https://railway.app/dashboard".to_string()
}

fn default_estimated_time() -> String {
    "2-3 minutes".to_string()
}

/// Where the commit is pushed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
            branch: default_branch(),
        }
    }
}

/// Commit message settings.
///
/// `default_label` prefixes the timestamped message used when the operator gives no message.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    #[serde(default = "default_label")]
    pub default_label: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            default_label: default_label(),
        }
    }
}

/// The deployment platform watching the remote branch.
///
/// Only used to print guidance; the platform is never contacted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlatformConfig {
    #[serde(default = "default_platform_name")]
    pub name: String,

    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    #[serde(default = "default_estimated_time")]
    pub estimated_time: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        PlatformConfig {
            name: default_platform_name(),
            dashboard_url: default_dashboard_url(),
            estimated_time: default_estimated_time(),
        }
    }
}

/// Which implementation performs the git operations.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// In-process libgit2 via the `git2` crate
    #[default]
    Libgit2,
    /// The `git` executable on PATH
    GitCli,
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Exit non-zero when the push fails
    #[serde(default)]
    pub strict_exit: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `deploypush.toml` in current directory
/// 3. `.deploypush.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        read_config_file(Path::new(LOCAL_CONFIG_FILE))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML document, filling missing keys with defaults.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "loading config");
    fs::read_to_string(path)
        .map_err(|e| DeployError::config(format!("Cannot read {}: {}", path.display(), e)))
}
