//! Common type definitions and newtype wrappers for domain modeling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MigboardError;

/// A calendar month rendered as `YYYY-MM`.
///
/// Labels order chronologically because the year is always four digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthLabel(String);

impl MonthLabel {
    /// Returns the label for the month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m").to_string())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for MonthLabel {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl FromStr for MonthLabel {
    type Err = MigboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|e| MigboardError::Config(format!("invalid month label '{trimmed}': {e}")))
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One month of migration progress for one business function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// First day of the tracked month (uploaded data keeps its own day).
    pub month: NaiveDate,
    /// Organizational category bucket, e.g. `Finance`.
    pub business_function: String,
    /// Workspaces migrated in this month.
    pub workspace_count: u32,
    /// Data volume migrated in this month, in terabytes.
    pub data_volume_tb: f64,
}

impl MigrationRecord {
    /// Creates a new record.
    pub fn new(
        month: NaiveDate,
        business_function: impl Into<String>,
        workspace_count: u32,
        data_volume_tb: f64,
    ) -> Self {
        Self {
            month,
            business_function: business_function.into(),
            workspace_count,
            data_volume_tb,
        }
    }

    /// Returns the `YYYY-MM` label of this record's month.
    pub fn month_label(&self) -> MonthLabel {
        MonthLabel::from_date(self.month)
    }
}
