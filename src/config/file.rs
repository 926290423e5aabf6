// src/config/file.rs
//! Configuration file management.
//!
//! Settings live in a TOML file in the user's config directory. Every key is
//! optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Smallest accepted analysis window.
pub const MIN_WINDOW_SIZE: usize = 32;
/// Largest accepted analysis window.
pub const MAX_WINDOW_SIZE: usize = 32768;

/// Parameters of the analysis node. Fixed once a capture is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples per analysis window (power of two)
    pub window_size: usize,
    /// Temporal smoothing between frames (0.0 = none, 1.0 = frozen)
    pub smoothing: f32,
    /// Level mapped to byte 0
    pub min_decibels: f32,
    /// Level mapped to byte 255
    pub max_decibels: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 512,
            smoothing: 0.6,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalysisConfig {
    /// Check the parameters against what the analyser can handle.
    pub fn validate(&self) -> Result<(), CaptureError> {
        if !self.window_size.is_power_of_two()
            || !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&self.window_size)
        {
            return Err(CaptureError::InvalidConfig(format!(
                "window_size must be a power of two in {MIN_WINDOW_SIZE}..={MAX_WINDOW_SIZE}, got {}",
                self.window_size
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(CaptureError::InvalidConfig(format!(
                "smoothing must be within 0.0..=1.0, got {}",
                self.smoothing
            )));
        }
        if !(self.min_decibels < self.max_decibels) {
            return Err(CaptureError::InvalidConfig(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}

/// Chart colours and layout. Colours accept ratatui names or `#rrggbb`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub frequency_color: String,
    pub waveform_color: String,
    pub border_color: String,
    /// Draw frequency bars mirrored around the centre
    pub mirrored: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            frequency_color: "white".to_string(),
            waveform_color: "cyan".to_string(),
            border_color: "gray".to_string(),
            mirrored: true,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChirpvizConfig {
    pub analysis: AnalysisConfig,
    pub theme: ThemeConfig,
}

impl ChirpvizConfig {
    /// Load the config from `path`, or from the default location when `None`.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No home directory, using default config");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialise the config as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// `~/.config/chirpviz/chirpviz.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("chirpviz").join("chirpviz.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.window_size, 512);
        assert_eq!(config.smoothing, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = ChirpvizConfig::from_toml(
            r##"
            [analysis]
            window_size = 1024

            [theme]
            waveform_color = "#ff8800"
            "##,
        )
        .unwrap();

        assert_eq!(config.analysis.window_size, 1024);
        assert_eq!(config.analysis.smoothing, 0.6);
        assert_eq!(config.theme.waveform_color, "#ff8800");
        assert_eq!(config.theme.frequency_color, "white");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ChirpvizConfig::from_toml("").unwrap(), ChirpvizConfig::default());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = ChirpvizConfig::default();
        config.analysis.smoothing = 0.25;
        config.theme.mirrored = false;
        let text = config.to_toml().unwrap();
        assert_eq!(ChirpvizConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn rejects_bad_window_sizes() {
        for window_size in [0, 16, 500, 65536] {
            let config = AnalysisConfig {
                window_size,
                ..AnalysisConfig::default()
            };
            assert!(matches!(config.validate(), Err(CaptureError::InvalidConfig(_))));
        }
    }

    #[test]
    fn rejects_bad_smoothing_and_db_range() {
        let smoothing = AnalysisConfig {
            smoothing: 1.5,
            ..AnalysisConfig::default()
        };
        assert!(smoothing.validate().is_err());

        let nan = AnalysisConfig {
            smoothing: f32::NAN,
            ..AnalysisConfig::default()
        };
        assert!(nan.validate().is_err());

        let range = AnalysisConfig {
            min_decibels: -30.0,
            max_decibels: -30.0,
            ..AnalysisConfig::default()
        };
        assert!(range.validate().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join(format!("chirpviz-missing-{}.toml", std::process::id()));
        let config = ChirpvizConfig::load(Some(&path)).unwrap();
        assert_eq!(config, ChirpvizConfig::default());
    }
}
