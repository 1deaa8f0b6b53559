//! Shared configuration for the Campus CLI.
//!
//! A TOML file plus `CAMPUS_*` environment variables, translated into
//! the `DeploymentConfig` and `TransportConfig` that `campus-api` wants,
//! and a file-backed [`SessionStore`](campus_api::SessionStore) so a
//! sign-in survives between invocations.

mod store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use campus_api::{DEFAULT_GATEWAY_PATTERNS, DeploymentConfig, TlsMode, TransportConfig};

pub use store::FileStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// API base URL. Unset means the local development backend.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Host fragments that mark a managed API gateway.
    #[serde(default = "default_gateway_patterns")]
    pub gateway_patterns: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// PEM file with an extra root certificate.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Where the session tokens are kept. Defaults to the platform data dir.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            gateway_patterns: default_gateway_patterns(),
            request_timeout_secs: default_request_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            insecure: false,
            ca_cert: None,
            session_file: None,
        }
    }
}

fn default_gateway_patterns() -> Vec<String> {
    DEFAULT_GATEWAY_PATTERNS
        .iter()
        .map(|p| (*p).to_owned())
        .collect()
}
fn default_request_timeout() -> u64 {
    10
}
fn default_probe_timeout() -> u64 {
    5
}

impl Config {
    /// Deployment facts for the configured URL.
    pub fn deployment(&self) -> DeploymentConfig {
        DeploymentConfig::detect_with_patterns(self.api_url.as_deref(), &self.gateway_patterns)
    }

    /// HTTP settings. `insecure` wins over `ca_cert`.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca) = self.ca_cert {
            TlsMode::CustomCa(ca.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.request_timeout_secs),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
        }
    }

    /// Configured session file, or `session.json` in the data dir.
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(session_path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "request_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "probe_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if let Some(ref url) = self.api_url {
            let trimmed = url.trim();
            if !trimmed.is_empty()
                && !(trimmed.starts_with("http://") || trimmed.starts_with("https://"))
            {
                return Err(ConfigError::Validation {
                    field: "api_url".into(),
                    reason: format!("expected an http(s) URL, got '{url}'"),
                });
            }
        }
        Ok(())
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "campus", "campus")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of the durable session.
pub fn session_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share").join("session.json"),
        |dirs| dirs.data_dir().join("session.json"),
    )
}

fn dirs_fallback(sub: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(sub);
    p.push("campus");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then `CAMPUS_*` variables.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CAMPUS_"))
}

/// Load the config from the canonical path and environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        Config::default()
    })
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
