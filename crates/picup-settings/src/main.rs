//! picup: picture-uploads settings from the command line.
//!
//! Reads and changes the camera picture-uploads preferences and keeps the
//! camera-uploads sync job in line with them.  Every command prints a JSON
//! [`CommandResult`] on stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! picup [OPTIONS] <COMMAND>
//!
//! Commands:
//!   status               Show the current settings
//!   enable               Enable picture uploads and schedule the sync job
//!   disable              Disable picture uploads
//!   wifi-only <BOOL>     Only upload pictures over Wi-Fi
//!   behaviour <KIND>     What to do with a picture after upload (nothing, move)
//!   select-upload-path   Apply a destination picker result [--folder PATH]
//!   select-source-path   Apply a source picker result [--path PATH]
//!   reset-last-sync      Reset the pictures last-sync baseline
//!   schedule             Schedule the sync job if picture uploads are enabled
//!   init-config          Write a starter config file [--force]
//!
//! Options:
//!   --config <FILE>        Config file [env: PICUP_CONFIG]
//!   --preferences <FILE>   Preferences file [env: PICUP_PREFERENCES]
//! ```
//!
//! Log verbosity comes from `RUST_LOG` when set, otherwise from
//! `logging.log_level` in the config file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use picup_core::BehaviourAfterUpload;
use picup_settings::application::clock::SystemClock;
use picup_settings::infrastructure::scheduler::job_file::FileJobScheduler;
use picup_settings::infrastructure::settings_bridge::{self, AppState, CommandResult};
use picup_settings::infrastructure::storage::config::{
    config_file_path, init_config_at, load_config_from, AppConfig,
};
use picup_settings::infrastructure::storage::preferences::TomlPreferencesStore;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Picture-uploads settings.
#[derive(Debug, Parser)]
#[command(name = "picup", about = "Manage camera picture-uploads settings", version)]
struct Cli {
    /// Config file.  Defaults to `config.toml` in the platform config directory.
    #[arg(long, global = true, env = "PICUP_CONFIG")]
    config: Option<PathBuf>,

    /// Preferences file.  Overrides `storage.preferences_file` from the config.
    #[arg(long, global = true, env = "PICUP_PREFERENCES")]
    preferences: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Write a starter config file with the storage paths spelled out.
    InitConfig {
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },
    #[command(flatten)]
    Settings(SettingsCommand),
}

#[derive(Debug, Clone, Subcommand, PartialEq)]
enum SettingsCommand {
    /// Show the current picture-uploads settings.
    Status,
    /// Enable picture uploads and schedule the sync job.
    Enable,
    /// Disable picture uploads.
    Disable,
    /// Only upload pictures over Wi-Fi.
    WifiOnly {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
    /// What to do with a picture after it was uploaded.
    Behaviour {
        #[arg(value_enum)]
        behaviour: BehaviourArg,
    },
    /// Apply a destination picker result.  Omit `--folder` for an empty result.
    SelectUploadPath {
        #[arg(long)]
        folder: Option<String>,
    },
    /// Apply a source picker result.  Omit `--path` for an empty result.
    SelectSourcePath {
        #[arg(long)]
        path: Option<String>,
    },
    /// Reset the pictures last-sync baseline.
    ResetLastSync,
    /// Schedule the sync job if picture uploads are enabled.
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BehaviourArg {
    Nothing,
    Move,
}

impl From<BehaviourArg> for BehaviourAfterUpload {
    fn from(arg: BehaviourArg) -> Self {
        match arg {
            BehaviourArg::Nothing => BehaviourAfterUpload::Nothing,
            BehaviourArg::Move => BehaviourAfterUpload::Move,
        }
    }
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config_file_path().context("no --config given"),
        }
    }

    /// Loads the config file and resolves the directory relative paths hang off.
    fn load_config(&self) -> anyhow::Result<(AppConfig, PathBuf)> {
        let path = self.config_path()?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let config = load_config_from(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        Ok((config, base_dir))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let command = match &cli.command {
        Command::InitConfig { force } => {
            init_logging(&AppConfig::default().logging.log_level);
            let path = cli.config_path()?;
            return exit_code(emit(init_config(&path, *force)));
        }
        Command::Settings(command) => command.clone(),
    };

    let (config, base_dir) = cli.load_config()?;
    init_logging(&config.logging.log_level);

    let preferences_file = cli
        .preferences
        .clone()
        .unwrap_or_else(|| config.preferences_file(&base_dir));
    let jobs_dir = config.jobs_dir(&base_dir);
    debug!(
        "preferences at {}, jobs at {}",
        preferences_file.display(),
        jobs_dir.display()
    );

    let preferences = TomlPreferencesStore::open(&preferences_file)
        .with_context(|| format!("failed to open preferences {}", preferences_file.display()))?;
    let state = AppState::new(
        Arc::new(preferences),
        Arc::new(FileJobScheduler::new(jobs_dir)),
        Arc::new(SystemClock),
    );

    exit_code(run(&state, command))
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(success: anyhow::Result<bool>) -> anyhow::Result<ExitCode> {
    Ok(if success? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_config(path: &Path, force: bool) -> CommandResult<AppConfig> {
    match init_config_at(path, force) {
        Ok(config) => CommandResult::ok(config),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Runs `command` and prints its result.  Returns whether it succeeded.
fn run(state: &AppState, command: SettingsCommand) -> anyhow::Result<bool> {
    match command {
        SettingsCommand::Status => emit(settings_bridge::get_picture_uploads(state)),
        SettingsCommand::Enable => {
            emit(settings_bridge::set_picture_uploads_enabled(state, true))
        }
        SettingsCommand::Disable => {
            emit(settings_bridge::set_picture_uploads_enabled(state, false))
        }
        SettingsCommand::WifiOnly { value } => emit(settings_bridge::set_wifi_only(state, value)),
        SettingsCommand::Behaviour { behaviour } => emit(
            settings_bridge::set_behaviour_after_upload(state, behaviour.into()),
        ),
        SettingsCommand::SelectUploadPath { folder } => {
            emit(settings_bridge::select_upload_path(state, folder))
        }
        SettingsCommand::SelectSourcePath { path } => {
            emit(settings_bridge::select_source_path(state, path))
        }
        SettingsCommand::ResetLastSync => emit(settings_bridge::reset_pictures_last_sync(state)),
        SettingsCommand::Schedule => emit(settings_bridge::schedule_sync_job(state)),
    }
}

fn emit<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<bool> {
    let json = serde_json::to_string_pretty(&result).context("failed to encode result")?;
    println!("{json}");
    Ok(result.success)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_status() {
        let cli = Cli::parse_from(["picup", "status"]);
        assert_eq!(cli.command, Command::Settings(SettingsCommand::Status));
    }

    #[test]
    fn test_cli_parses_wifi_only_value() {
        let cli = Cli::parse_from(["picup", "wifi-only", "false"]);
        assert_eq!(cli.command, Command::Settings(SettingsCommand::WifiOnly { value: false }));
    }

    #[test]
    fn test_cli_parses_behaviour() {
        let cli = Cli::parse_from(["picup", "behaviour", "move"]);
        assert_eq!(
            cli.command,
            Command::Settings(SettingsCommand::Behaviour {
                behaviour: BehaviourArg::Move
            })
        );
        assert_eq!(
            BehaviourAfterUpload::from(BehaviourArg::Move),
            BehaviourAfterUpload::Move
        );
    }

    #[test]
    fn test_cli_rejects_unknown_behaviour() {
        assert!(Cli::try_parse_from(["picup", "behaviour", "shred"]).is_err());
    }

    #[test]
    fn test_cli_select_upload_path_folder_is_optional() {
        let cli = Cli::parse_from(["picup", "select-upload-path"]);
        assert_eq!(cli.command, Command::Settings(SettingsCommand::SelectUploadPath { folder: None }));

        let cli = Cli::parse_from(["picup", "select-upload-path", "--folder", "/Photos"]);
        assert_eq!(
            cli.command,
            Command::Settings(SettingsCommand::SelectUploadPath {
                folder: Some("/Photos".to_string())
            })
        );
    }

    #[test]
    fn test_cli_global_preferences_after_subcommand() {
        let cli = Cli::parse_from(["picup", "status", "--preferences", "/tmp/p.toml"]);
        assert_eq!(cli.preferences, Some(PathBuf::from("/tmp/p.toml")));
    }

    #[test]
    fn test_load_config_with_explicit_missing_file_uses_defaults() {
        // Arrange
        let cli = Cli::parse_from([
            "picup",
            "--config",
            "/nonexistent/picup/config.toml",
            "status",
        ]);

        // Act
        let (config, base_dir) = cli.load_config().unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
        assert_eq!(base_dir, PathBuf::from("/nonexistent/picup"));
        assert_eq!(
            config.preferences_file(&base_dir),
            PathBuf::from("/nonexistent/picup/preferences.toml")
        );
    }

    #[test]
    fn test_cli_parses_init_config() {
        let cli = Cli::parse_from(["picup", "init-config", "--force"]);
        assert_eq!(cli.command, Command::InitConfig { force: true });

        let cli = Cli::parse_from(["picup", "init-config"]);
        assert_eq!(cli.command, Command::InitConfig { force: false });
    }

    #[test]
    fn test_init_config_writes_file_once() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("picup_cli_test_{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        // Act
        let first = init_config(&path, false);
        let second = init_config(&path, false);

        // Assert
        assert!(first.success);
        assert_eq!(
            first.data.and_then(|c| c.storage.jobs_dir),
            Some(dir.join("jobs"))
        );
        assert!(!second.success);
        assert!(second.error.unwrap().contains("--force"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
