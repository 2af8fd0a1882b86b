//! Configuration loading
//!
//! Each setting is resolved independently, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable (`GROUPIE_*`)
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing config file is never an error. A config file that exists but
//! does not parse is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Public catalog API
pub const DEFAULT_API_BASE_URL: &str = "https://groupietrackers.herokuapp.com/api";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ASSETS_DIR: &str = "./assets";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_CONFIG: &str = "GROUPIE_CONFIG";
pub const ENV_BIND: &str = "GROUPIE_BIND";
pub const ENV_API_URL: &str = "GROUPIE_API_URL";
pub const ENV_ASSETS_DIR: &str = "GROUPIE_ASSETS_DIR";
pub const ENV_LOG_LEVEL: &str = "GROUPIE_LOG_LEVEL";
pub const ENV_REQUEST_TIMEOUT: &str = "GROUPIE_REQUEST_TIMEOUT";
pub const ENV_PRELOAD: &str = "GROUPIE_PRELOAD";

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    pub bind_addr: String,
    /// Catalog API base URL, without trailing slash
    pub api_base_url: String,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
    /// Default tracing level directive
    pub log_level: String,
    /// Per-request timeout for catalog calls; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
    /// Load the catalog before accepting connections
    pub preload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout_secs: None,
            preload: false,
        }
    }
}

/// Logging section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk config file layout
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// api_base_url = "https://groupietrackers.herokuapp.com/api"
/// assets_dir = "/usr/share/groupie-tracker/assets"
/// request_timeout_secs = 30
/// preload = true
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub api_base_url: Option<String>,
    pub assets_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub preload: Option<bool>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values supplied by one override layer (command line or environment)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub api_base_url: Option<String>,
    pub assets_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub preload: Option<bool>,
}

impl ConfigOverrides {
    /// Read the `GROUPIE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let request_timeout_secs = match env_value(ENV_REQUEST_TIMEOUT) {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_REQUEST_TIMEOUT, raw
                ))
            })?),
            None => None,
        };

        let preload = match env_value(ENV_PRELOAD) {
            Some(raw) => Some(parse_bool(&raw).ok_or_else(|| {
                Error::Config(format!("{} must be true or false, got {:?}", ENV_PRELOAD, raw))
            })?),
            None => None,
        };

        Ok(Self {
            bind_addr: env_value(ENV_BIND),
            api_base_url: env_value(ENV_API_URL),
            assets_dir: env_value(ENV_ASSETS_DIR).map(PathBuf::from),
            log_level: env_value(ENV_LOG_LEVEL),
            request_timeout_secs,
            preload,
        })
    }
}

/// Resolves [`ServerConfig`] from all configuration layers
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// `explicit_path` is the `--config` argument, if any
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// Config file to read, if one is named or exists in a standard location
    ///
    /// Order: `--config`, `$GROUPIE_CONFIG`, `<user config dir>/groupie-tracker/config.toml`,
    /// then `/etc/groupie-tracker/config.toml` on Linux.
    pub fn config_file_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit_path {
            return Some(path.clone());
        }

        if let Some(path) = env_value(ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }

        let user_config = dirs::config_dir().map(|d| d.join("groupie-tracker").join("config.toml"));
        if let Some(path) = user_config {
            if path.exists() {
                return Some(path);
            }
        }

        if cfg!(target_os = "linux") {
            let system_config = PathBuf::from("/etc/groupie-tracker/config.toml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load the config file, or an empty one when none is found
    pub fn load_toml(&self) -> Result<TomlConfig> {
        match self.config_file_path() {
            Some(path) if path.exists() => load_toml_file(&path),
            Some(path) => {
                warn!("Config file not found: {} (using defaults)", path.display());
                Ok(TomlConfig::default())
            }
            None => {
                debug!("No config file found (using defaults)");
                Ok(TomlConfig::default())
            }
        }
    }

    /// Merge command line, environment, config file and defaults
    pub fn resolve(&self, cli: &ConfigOverrides) -> Result<ServerConfig> {
        let env = ConfigOverrides::from_env()?;
        let file = self.load_toml()?;
        merge(cli, &env, &file)
    }
}

/// Combine the layers field by field, highest priority first
pub fn merge(cli: &ConfigOverrides, env: &ConfigOverrides, file: &TomlConfig) -> Result<ServerConfig> {
    let defaults = ServerConfig::default();

    let api_base_url = cli
        .api_base_url
        .clone()
        .or_else(|| env.api_base_url.clone())
        .or_else(|| file.api_base_url.clone())
        .unwrap_or(defaults.api_base_url);
    let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();
    if api_base_url.is_empty() {
        return Err(Error::Config("api_base_url must not be empty".to_string()));
    }

    let bind_addr = cli
        .bind_addr
        .clone()
        .or_else(|| env.bind_addr.clone())
        .or_else(|| file.bind_addr.clone())
        .unwrap_or(defaults.bind_addr);
    if bind_addr.trim().is_empty() {
        return Err(Error::Config("bind_addr must not be empty".to_string()));
    }

    // Zero disables the timeout
    let request_timeout_secs = cli
        .request_timeout_secs
        .or(env.request_timeout_secs)
        .or(file.request_timeout_secs)
        .filter(|secs| *secs > 0);

    Ok(ServerConfig {
        bind_addr,
        api_base_url,
        assets_dir: cli
            .assets_dir
            .clone()
            .or_else(|| env.assets_dir.clone())
            .or_else(|| file.assets_dir.clone())
            .unwrap_or(defaults.assets_dir),
        log_level: cli
            .log_level
            .clone()
            .or_else(|| env.log_level.clone())
            .or_else(|| file.logging.level.clone())
            .unwrap_or(defaults.log_level),
        request_timeout_secs,
        preload: cli
            .preload
            .or(env.preload)
            .or(file.preload)
            .unwrap_or(defaults.preload),
    })
}

fn load_toml_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content).map_err(|source| Error::TomlParse {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
