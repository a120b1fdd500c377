//! Default values for every configuration section.

use crate::schema::*;
use chrono::NaiveDate;

/// Business functions tracked by the sample dataset.
pub const DEFAULT_BUSINESS_FUNCTIONS: [&str; 9] = [
    "Finance",
    "HR",
    "Sales",
    "Marketing",
    "Customer Ops",
    "Engineering",
    "Legal",
    "Analytics",
    "Procurement",
];

/// Number of months in the sample dataset.
pub const DEFAULT_MONTHS: u32 = 19;

/// Seed of the sample dataset.
pub const DEFAULT_SEED: u64 = 42;

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generator: GeneratorConfig::default(),
            chart: ChartConfig::default(),
            video: VideoConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            start_month: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default(),
            months: DEFAULT_MONTHS,
            business_functions: DEFAULT_BUSINESS_FUNCTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Workspace Migration Count by Business Function (Monthly)".to_string(),
            height: 600,
            x_axis_title: "Workspace Count".to_string(),
            y_axis_title: "Business Function".to_string(),
            range_headroom: 1.2,
            min_range: 10.0,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: 2,
            width: 800,
            height: 500,
            output_dir: None,
            ffmpeg_path: "ffmpeg".to_string(),
            bar_color: "#87ceeb".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "migboard=info,tower_http=info".to_string(),
            json: false,
        }
    }
}
