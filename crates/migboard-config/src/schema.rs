//! Configuration schema definitions using serde.

use chrono::NaiveDate;
use migboard_common::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::validator::ConfigValidator;

/// Main configuration structure for Migboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Synthetic data generator configuration.
    pub generator: GeneratorConfig,
    /// Interactive chart configuration.
    pub chart: ChartConfig,
    /// Video export configuration.
    pub video: VideoConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Largest accepted upload body in bytes.
    pub max_upload_bytes: usize,
}

/// Synthetic data generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Random seed; the same seed always yields the same table.
    pub seed: u64,
    /// First generated month.
    pub start_month: NaiveDate,
    /// Number of consecutive months to generate.
    pub months: u32,
    /// Business functions, generated in this order.
    pub business_functions: Vec<String>,
}

/// Interactive chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// Chart height in pixels.
    pub height: u32,
    /// X axis title.
    pub x_axis_title: String,
    /// Y axis title.
    pub y_axis_title: String,
    /// Multiplier applied to the largest workspace count for the x range.
    pub range_headroom: f64,
    /// Smallest allowed upper bound of the x range.
    pub min_range: f64,
}

/// Video export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Frames per second of the assembled video.
    pub fps: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Directory receiving generated videos; the OS temp dir when unset.
    pub output_dir: Option<PathBuf>,
    /// Path or name of the ffmpeg binary.
    pub ffmpeg_path: String,
    /// Bar fill color in `#rrggbb` form.
    pub bar_color: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate(self)
    }
}

impl VideoConfig {
    /// Directory where generated videos are written.
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl ServerConfig {
    /// `host:port` string for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
