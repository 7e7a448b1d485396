//! Locating the layout settings for a run.
//!
//! `--config` always wins. Without it the CLI looks for
//! `daypack/config.toml` below the working directory, then for
//! `config.toml` in the per-user config directory of `com.daypack.daypack`
//! (`~/.config/daypack` on Linux). If neither exists the agenda defaults
//! apply. `demos/config/daypack.toml` shows every setting.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use daypack::{DaypackError, config::AppConfig};

const LOCAL_CONFIG: &str = "daypack/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for DaypackError {
    fn from(err: ConfigError) -> Self {
        DaypackError::Config(err.to_string())
    }
}

/// Where the settings of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; must exist
    Explicit(PathBuf),
    /// `daypack/config.toml` below the working directory
    Local(PathBuf),
    /// The per-user config directory
    User(PathBuf),
    Defaults,
}

impl ConfigSource {
    /// Pick the first source that applies.
    pub fn locate(explicit_path: Option<&Path>) -> Self {
        if let Some(path) = explicit_path {
            return Self::Explicit(path.to_path_buf());
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Self::Local(local);
        }

        match ProjectDirs::from("com", "daypack", "daypack") {
            Some(dirs) => {
                let user = dirs.config_dir().join("config.toml");
                if user.exists() {
                    return Self::User(user);
                }
                debug!(path = user.display().to_string(); "No per-user configuration");
            }
            None => debug!("No home directory, skipping per-user configuration"),
        }

        Self::Defaults
    }

    /// The file to read, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::User(path) => Some(path),
            Self::Defaults => None,
        }
    }
}

/// Load the settings for a run.
///
/// # Errors
///
/// Returns [`DaypackError::Config`] if an explicit path does not exist or the
/// chosen file is not a valid configuration, and [`DaypackError::Io`] if it
/// cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DaypackError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(AsRef::as_ref);
    let source = ConfigSource::locate(explicit_path);

    let Some(path) = source.path() else {
        debug!("No configuration file found, using defaults");
        return Ok(AppConfig::default());
    };

    info!(source:?; "Loading configuration");
    read_config(path)
}

fn read_config(path: &Path) -> Result<AppConfig, DaypackError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        }
        .into()
    })
}
