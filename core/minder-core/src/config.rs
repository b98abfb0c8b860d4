//! Runtime configuration for the watch daemon.
//!
//! Loaded from `~/.minder/config.toml`. Every field has a default so a
//! missing file runs the stock Citrix Desktop Viewer setup unchanged.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{MinderError, Result};

const CONFIG_RELATIVE_PATH: &str = ".minder/config.toml";
const LEDGER_RELATIVE_PATH: &str = ".minder/attendance.json";

/// What to watch and how patient to be, resolved once at startup and handed
/// by value into the components that need it.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Substring looked for in the foreground window title.
    #[serde(default = "default_window_title")]
    pub window_title: String,
    /// Process name looked for in the process table.
    #[serde(default = "default_process_name")]
    pub process_name: String,
    /// Seconds without focus before a relaunch attempt fires.
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
    /// Seconds until the next attempt after a failed relaunch.
    #[serde(default = "default_retry_secs")]
    pub retry_timeout_secs: u64,
    /// Ledger location; defaults under the home directory when unset.
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            window_title: default_window_title(),
            process_name: default_process_name(),
            default_timeout_secs: default_timeout_secs(),
            retry_timeout_secs: default_retry_secs(),
            ledger_path: None,
        }
    }
}

impl WatchConfig {
    /// The ledger file this configuration points at.
    pub fn ledger_file(&self) -> Result<PathBuf> {
        match &self.ledger_path {
            Some(path) => Ok(path.clone()),
            None => default_ledger_path(),
        }
    }
}

fn default_window_title() -> String {
    "Desktop Viewer".to_string()
}

fn default_process_name() -> String {
    "CDViewer.exe".to_string()
}

fn default_timeout_secs() -> u64 {
    1200
}

fn default_retry_secs() -> u64 {
    5
}

pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(MinderError::HomeDirNotFound)?;
    Ok(home.join(CONFIG_RELATIVE_PATH))
}

pub fn default_ledger_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(MinderError::HomeDirNotFound)?;
    Ok(home.join(LEDGER_RELATIVE_PATH))
}

/// Loads configuration from `path`, or from the default location when none
/// is given.
///
/// A missing file is the default configuration; only a file that exists but
/// will not read or parse is an error.
pub fn load_config(path: Option<PathBuf>) -> Result<WatchConfig> {
    let config_path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };

    if !config_path.exists() {
        return Ok(WatchConfig::default());
    }

    let content = fs_err::read_to_string(&config_path).map_err(|err| MinderError::Io {
        context: format!("reading config {}", config_path.display()),
        source: err,
    })?;
    toml::from_str::<WatchConfig>(&content).map_err(|err| MinderError::ConfigMalformed {
        path: config_path.clone(),
        details: err.to_string(),
    })
}
