//! Test utilities and shared test helpers for Migboard.
//!
//! This module provides logging setup, record fixtures and proptest
//! strategies that can be used across all crates in the workspace.

use chrono::NaiveDate;
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Test fixture for the first day of a month.
pub fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid test month")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Record fixtures for table, chart and video tests.
pub mod record_fixtures {
    use super::month;
    use crate::MigrationRecord;

    /// Three months for two business functions, deliberately unsorted.
    pub fn small_records() -> Vec<MigrationRecord> {
        vec![
            MigrationRecord::new(month(2024, 7), "HR", 6, 1.5),
            MigrationRecord::new(month(2024, 6), "Finance", 10, 2.25),
            MigrationRecord::new(month(2024, 6), "HR", 4, 0.5),
            MigrationRecord::new(month(2024, 8), "Finance", 14, 3.0),
            MigrationRecord::new(month(2024, 7), "Finance", 12, 2.75),
            MigrationRecord::new(month(2024, 8), "HR", 9, 1.125),
        ]
    }

    /// CSV text matching [`small_records`] with only the four base columns.
    pub fn small_csv() -> &'static str {
        concat!(
            "month,business_function,workspace_count,data_volume_tb\n",
            "2024-06-01,Finance,10,2.25\n",
            "2024-06-01,HR,4,0.5\n",
            "2024-07-01,Finance,12,2.75\n",
            "2024-07-01,HR,6,1.5\n",
            "2024-08-01,Finance,14,3.0\n",
            "2024-08-01,HR,9,1.125\n",
        )
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
server:
  host: "127.0.0.1"
  port: 8081

generator:
  seed: 7
  months: 3
  business_functions: ["Finance", "HR"]
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "server:\n",
            "  host: \"0.0.0.0\"\n",
            "  port: 9000\n",
            "  max_upload_bytes: 1048576\n",
            "\n",
            "generator:\n",
            "  seed: 42\n",
            "  start_month: \"2024-06-01\"\n",
            "  months: 19\n",
            "  business_functions: [\"Finance\", \"HR\", \"Sales\"]\n",
            "\n",
            "chart:\n",
            "  title: \"Migration\"\n",
            "  height: 500\n",
            "  x_axis_title: \"Workspaces\"\n",
            "  y_axis_title: \"Function\"\n",
            "  range_headroom: 1.5\n",
            "  min_range: 20.0\n",
            "\n",
            "video:\n",
            "  fps: 4\n",
            "  width: 640\n",
            "  height: 400\n",
            "  output_dir: \"/tmp/migboard\"\n",
            "  ffmpeg_path: \"/usr/bin/ffmpeg\"\n",
            "  bar_color: \"#87ceeb\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json: true\n",
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::MigrationRecord;
    use proptest::prelude::*;

    /// Strategy for generating business function names.
    pub fn business_function_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Finance", "HR", "Sales", "Legal"]).prop_map(str::to_string)
    }

    /// Strategy for generating a single record within the first months of 2024.
    pub fn record_strategy() -> impl Strategy<Value = MigrationRecord> {
        (
            1u32..=12,
            business_function_strategy(),
            0u32..500,
            0.0f64..100.0,
        )
            .prop_map(|(m, bf, ws, tb)| {
                MigrationRecord::new(super::month(2024, m), bf, ws, tb)
            })
    }

    /// Strategy for generating record sets.
    pub fn records_strategy() -> impl Strategy<Value = Vec<MigrationRecord>> {
        prop::collection::vec(record_strategy(), 0..60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_small_records_cover_three_months() {
        let records = record_fixtures::small_records();
        let mut months: Vec<_> = records.iter().map(|r| r.month).collect();
        months.sort();
        months.dedup();
        assert_eq!(months.len(), 3);
    }
}
