use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::subtitle_encoder::SubtitleFormat;

/// Application configuration module
/// This module handles the exporter configuration including loading,
/// validating and defaulting settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Ceiling on segments processed per export request
    #[serde(default = "default_max_segments_per_export")]
    pub max_segments_per_export: usize,

    /// Formats the exporter will serve
    #[serde(default = "default_enabled_formats")]
    pub enabled_formats: Vec<SubtitleFormat>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_segments_per_export() -> usize {
    // Bounds worst-case latency and memory of a single request
    20_000
}

fn default_enabled_formats() -> Vec<SubtitleFormat> {
    vec![SubtitleFormat::Srt, SubtitleFormat::Vtt, SubtitleFormat::Txt]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_segments_per_export == 0 {
            return Err(anyhow!("max_segments_per_export must be greater than zero"));
        }

        if self.enabled_formats.is_empty() {
            return Err(anyhow!("at least one export format must be enabled"));
        }

        Ok(())
    }

    /// Check whether a format may be served under this configuration
    pub fn format_enabled(&self, format: SubtitleFormat) -> bool {
        self.enabled_formats.contains(&format)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            max_segments_per_export: default_max_segments_per_export(),
            enabled_formats: default_enabled_formats(),
            log_level: LogLevel::default(),
        }
    }
}
