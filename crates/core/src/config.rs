//! Application configuration.
//!
//! Values come from built-in defaults, optionally overridden by a TOML file
//! under the user's config directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::{report::DEFAULT_REPORT_FILE, store::DEFAULT_DATA_FILE};

/// Directory under `~/.config` holding `config.toml`.
pub const CONFIG_DIR: &str = "railcomp";
const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# railcomp configuration

# Directory that receives the data file and the report.
data_dir = "."

# Persisted train composition (JSON).
data_file = "train_data.txt"

# Seat occupancy spreadsheet.
report_file = "train_report.xlsx"

# Directory for log files, relative to the working directory.
log_dir = "logs"
"#;

/// Resolved application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding output files.
    pub data_dir: PathBuf,
    /// File name of the persisted train.
    pub data_file: String,
    /// File name of the xlsx report.
    pub report_file: String,
    /// Directory for log files.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load configuration, layering `path` over the defaults when it exists.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("data_dir", ".")?
            .set_default("data_file", DEFAULT_DATA_FILE)?
            .set_default("report_file", DEFAULT_REPORT_FILE)?
            .set_default("log_dir", "logs")?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Full path of the persisted train file.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    /// Full path of the report file.
    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(&self.report_file)
    }
}

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default configuration if no file exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    ensure_config_at(&path)?;
    Ok(path)
}

/// Write the default configuration to `path` unless it already exists.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "default config written");
    Ok(())
}
