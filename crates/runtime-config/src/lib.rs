//! Server configuration for projecthost.
//!
//! Values come from an optional `projecthost.toml` file and are then
//! overridden by environment variables, so container deployments can run
//! without any file at all.

use projecthost_core::{DEFAULT_KEY_PREFIX, RewriteStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canonical config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "projecthost.toml";

/// Environment variable naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "PROJECTHOST_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level configuration (persisted as `projecthost.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProxyConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub serving: ServingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible providers (R2, MinIO, ...).
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_false")]
    pub allow_http: bool,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: None,
            allow_http: false,
            key_prefix: default_key_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServingSettings {
    #[serde(default)]
    pub rewrite: RewriteStrategy,
    /// Serve the root document for paths that match no stored file.
    #[serde(default = "default_false")]
    pub spa_fallback: bool,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for ServingSettings {
    fn default() -> Self {
        Self {
            rewrite: RewriteStrategy::default(),
            spa_fallback: false,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3001
}
fn default_region() -> String {
    "us-east-1".to_string()
}
fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}
fn default_false() -> bool {
    false
}
fn default_fetch_timeout_secs() -> u64 {
    5
}

impl ProxyConfig {
    /// Load the config file (if any) and apply process environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match config_path_from(|name| std::env::var(name).ok()) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        cfg.apply_env(|name| std::env::var(name).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = var("BIND_ADDR") {
            self.server.bind_addr = v;
        }
        if let Some(v) = var("PORT") {
            self.server.port = parse_value("PORT", &v)?;
        }
        if let Some(v) = var("AWS_S3_BUCKET") {
            self.storage.bucket = v;
        }
        if let Some(v) = var("AWS_REGION") {
            self.storage.region = v;
        }
        if let Some(v) = var("AWS_ENDPOINT_URL") {
            self.storage.endpoint = Some(v);
        }
        if let Some(v) = var("AWS_ALLOW_HTTP") {
            self.storage.allow_http = parse_bool("AWS_ALLOW_HTTP", &v)?;
        }
        if let Some(v) = var("STORAGE_KEY_PREFIX") {
            self.storage.key_prefix = v;
        }
        if let Some(v) = var("REWRITE_STRATEGY") {
            self.serving.rewrite = parse_value("REWRITE_STRATEGY", &v)?;
        }
        if let Some(v) = var("SPA_FALLBACK") {
            self.serving.spa_fallback = parse_bool("SPA_FALLBACK", &v)?;
        }
        if let Some(v) = var("FETCH_TIMEOUT_SECS") {
            self.serving.fetch_timeout_secs = parse_value("FETCH_TIMEOUT_SECS", &v)?;
        }
        self.validate()
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serving.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "FETCH_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "fetch timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve which config file to read: an explicit path wins, then the
/// canonical file in the working directory if it exists.
fn config_path_from<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    local.exists().then_some(local)
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
