//! Runtime validation of loaded configuration.

use crate::schema::Config;
use migboard_common::{MigboardError, Result};
use std::collections::HashSet;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        if config.server.port == 0 {
            return Err(invalid("server.port must be non-zero"));
        }

        if config.server.max_upload_bytes == 0 {
            return Err(invalid("server.max_upload_bytes must be non-zero"));
        }

        let generator = &config.generator;
        if generator.months == 0 {
            return Err(invalid("generator.months must be at least 1"));
        }

        if generator.business_functions.is_empty() {
            return Err(invalid("generator.business_functions cannot be empty"));
        }

        let mut seen = HashSet::new();
        for name in &generator.business_functions {
            if name.trim().is_empty() {
                return Err(invalid("generator.business_functions contains a blank name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!(
                    "generator.business_functions lists '{name}' twice"
                )));
            }
        }

        if !(config.chart.range_headroom.is_finite() && config.chart.range_headroom >= 1.0) {
            return Err(invalid("chart.range_headroom must be at least 1.0"));
        }

        if !(config.chart.min_range.is_finite() && config.chart.min_range > 0.0) {
            return Err(invalid("chart.min_range must be positive"));
        }

        let video = &config.video;
        if video.fps == 0 {
            return Err(invalid("video.fps must be at least 1"));
        }

        // H.264 with yuv420p needs even dimensions.
        if video.width == 0 || video.height == 0 || video.width % 2 != 0 || video.height % 2 != 0 {
            return Err(invalid("video.width and video.height must be even and non-zero"));
        }

        if video.ffmpeg_path.trim().is_empty() {
            return Err(invalid("video.ffmpeg_path cannot be empty"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> MigboardError {
    MigboardError::Config(message.into())
}
