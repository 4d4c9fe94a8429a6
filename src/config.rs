use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File the binary looks for in the working directory.
pub const CONFIG_FILE: &str = "exoplanet_survey.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("chart window start {start} is past its end {end}")]
    InvalidWindow { start: usize, end: usize },
}

// ---------------------------------------------------------------------------
// ChartWindow – which filtered rows go on the bar chart
// ---------------------------------------------------------------------------

/// Zero-based, end-exclusive range of filtered rows shown on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartWindow {
    pub start: usize,
    pub end: usize,
}

impl Default for ChartWindow {
    fn default() -> Self {
        Self { start: 7, end: 13 }
    }
}

impl ChartWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The window clamped to a table of `len` rows. Never panics; may be empty.
    pub fn clamp(&self, len: usize) -> Range<usize> {
        let end = self.end.min(len);
        self.start.min(end)..end
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Everything a run needs. Missing keys in the config file take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Catalog table (VOTable, CSV or Parquet).
    pub catalog_path: PathBuf,
    /// Comma-delimited planet names.
    pub targets_path: PathBuf,
    pub chart_window: ChartWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("exoplanet_data.xml"),
            targets_path: PathBuf::from("top_24_planets.csv"),
            chart_window: ChartWindow::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PipelineConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config JSON that did not come from a file.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(text).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Use `path` when it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::info!("Using configuration from {}", path.display());
            Self::from_file(path)
        } else {
            log::debug!("No {} found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ChartWindow { start, end } = self.chart_window;
        if start > end {
            return Err(ConfigError::InvalidWindow { start, end });
        }
        Ok(())
    }
}
