//! TOML-based application configuration.
//!
//! Reads and writes `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\Picup\config.toml`
//! - Linux:    `~/.config/picup/config.toml`
//! - macOS:    `~/Library/Application Support/Picup/config.toml`
//!
//! ```toml
//! [storage]
//! preferences_file = "/home/me/.config/picup/preferences.toml"
//! jobs_dir = "/home/me/.config/picup/jobs"
//!
//! [logging]
//! log_level = "debug"
//! ```
//!
//! # Serde default values
//!
//! Every section and field is optional.  Sections carry `#[serde(default)]`
//! and `log_level` uses `#[serde(default = "default_log_level")]`, so an
//! empty file, a file from an older release, or no file at all loads as
//! [`AppConfig::default()`] for whatever is missing.
//!
//! # Storage paths
//!
//! Storage paths left unset resolve next to the config file
//! (`preferences.toml`, `jobs/`) through [`AppConfig::preferences_file`] and
//! [`AppConfig::jobs_dir`].  The `--config` flag moves that base directory
//! along with the file, and `--preferences` overrides the preferences file
//! alone.
//!
//! # Writing a config
//!
//! The `picup` binary only ever reads this file, with one exception:
//! `picup init-config` calls [`init_config_at`] to write a starter file with
//! both storage paths spelled out, so they are visible and easy to edit.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `init_config_at` was asked not to overwrite an existing file.
    #[error("config already exists at {path}; use --force to replace it")]
    AlreadyExists { path: PathBuf },

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where preferences and pending jobs are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// TOML file holding the key-value preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_file: Option<PathBuf>,
    /// Directory the sync job requests are written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// The preferences file, or `preferences.toml` inside `base_dir`.
    pub fn preferences_file(&self, base_dir: &Path) -> PathBuf {
        self.storage
            .preferences_file
            .clone()
            .unwrap_or_else(|| base_dir.join("preferences.toml"))
    }

    /// The jobs directory, or `jobs/` inside `base_dir`.
    pub fn jobs_dir(&self, base_dir: &Path) -> PathBuf {
        self.storage
            .jobs_dir
            .clone()
            .unwrap_or_else(|| base_dir.join("jobs"))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes a starter config to `path` with both storage paths spelled out,
/// resolved next to the config file the way unset paths are at load time.
///
/// An existing file is left alone unless `force` is set, in which case it is
/// replaced by the defaults.  The file is staged as `<path>.tmp` and renamed
/// into place.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] if the file exists and `force` is
/// not set, [`ConfigError::Io`] for file-system failures, or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn init_config_at(path: &Path, force: bool) -> Result<AppConfig, ConfigError> {
    if !force && path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let defaults = AppConfig::default();
    let config = AppConfig {
        storage: StorageConfig {
            preferences_file: Some(defaults.preferences_file(&base_dir)),
            jobs_dir: Some(defaults.jobs_dir(&base_dir)),
        },
        logging: defaults.logging,
    };

    if !base_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&base_dir).map_err(|source| ConfigError::Io {
            path: base_dir.clone(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(&config)?;
    let mut staging = path.as_os_str().to_os_string();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    std::fs::write(&staging, content).map_err(|source| ConfigError::Io {
        path: staging.clone(),
        source,
    })?;
    std::fs::rename(&staging, path).map_err(|source| {
        std::fs::remove_file(&staging).ok();
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("wrote config to {}", path.display());
    Ok(config)
}

/// Resolves the platform config base directory including the `picup` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Picup"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("picup"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("Picup"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
