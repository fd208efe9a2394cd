// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

/// The name of the application.
pub const APP_NAME: &str = "cadence";

/// Environment variable that overrides the database file.
pub const ENV_DB_FILE: &str = "CADENCE_DBFILE";

const DEFAULT_DB_FILE: &str = "scheduler.db";
const DEFAULT_LIST_LIMIT: i64 = 10;

/// Configuration for the scheduler.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Database file, relative paths are resolved against the state directory.
    #[serde(default = "default_db_file")]
    pub db_file: PathBuf,

    /// Maximum number of tasks returned by a listing.
    #[serde(default = "default_list_limit")]
    pub list_limit: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            db_file: default_db_file(),
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        self.db_file = expand_path(&self.db_file)
            .map_err(|e| format!("Failed to expand database file path: {e}"))?;

        if self.list_limit <= 0 {
            return Err(format!("list_limit must be positive, got {}", self.list_limit).into());
        }

        Ok(())
    }

    /// Where the database lives, honoring the `CADENCE_DBFILE` override.
    pub fn db_path(&self) -> Result<PathBuf, Box<dyn Error>> {
        let overridden = std::env::var(ENV_DB_FILE).ok();
        self.resolve_db_path(overridden.as_deref())
    }

    fn resolve_db_path(&self, overridden: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
        if let Some(path) = overridden.filter(|a| !a.trim().is_empty()) {
            tracing::debug!(path, "database file overridden by environment");
            return expand_path(Path::new(path));
        }

        match &self.state_dir {
            Some(dir) if self.db_file.is_relative() => Ok(dir.join(&self.db_file)),
            _ => Ok(self.db_file.clone()),
        }
    }
}

fn default_db_file() -> PathBuf {
    PathBuf::from(DEFAULT_DB_FILE)
}

fn default_list_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%APPDATA%\", "%APPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}
