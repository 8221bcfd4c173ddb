use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::mapper::{CoordinateFormat, ExiftoolMapper};

/// Top-level configuration for the exiftool-mapper tools.
///
/// Controls how raw exiftool output is interpreted and how mapped fields
/// are printed.
///
/// # Loading
///
/// ```rust,no_run
/// use exiftool_mapper::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.mapper.numeric = false;
/// let mapper = config.build_mapper();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How raw tag values are interpreted.
    pub mapper: MapperConfig,
    /// Output behavior (pretty printing, source file echo).
    pub output: OutputConfig,
}

/// Mapper settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// `true` if exiftool was run with `-n` (decimal GPS values), `false` for
    /// degree/minute/second strings.
    pub numeric: bool,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON output.
    pub pretty: bool,
    /// Copy exiftool's `SourceFile` into each mapped object.
    pub include_source: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self { numeric: true }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            include_source: true,
        }
    }
}

impl Config {
    /// Resolve the config file path (same directory as the executable).
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Build a mapper with the configured GPS grammar.
    pub fn build_mapper(&self) -> ExiftoolMapper {
        ExiftoolMapper::with_format(CoordinateFormat::from_numeric(self.mapper.numeric))
    }
}
