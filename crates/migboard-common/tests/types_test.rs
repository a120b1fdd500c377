//! Tests for the core type definitions in migboard-common.
//!
//! This test suite covers:
//! - MonthLabel formatting, parsing and chronological ordering
//! - MigrationRecord construction and serialization
//! - Error display strings

use chrono::NaiveDate;
use migboard_common::*;

#[cfg(test)]
mod month_label_tests {
    use super::*;

    #[test]
    fn test_month_label_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let label = MonthLabel::from_date(date);
        assert_eq!(label.as_str(), "2024-06");
        assert_eq!(format!("{}", label), "2024-06");
    }

    #[test]
    fn test_month_label_parse() {
        let label: MonthLabel = "2025-01".parse().unwrap();
        assert_eq!(label.to_string(), "2025-01");

        assert!("2025-13".parse::<MonthLabel>().is_err());
        assert!("not a month".parse::<MonthLabel>().is_err());
    }

    #[test]
    fn test_month_label_orders_chronologically() {
        let mut labels: Vec<MonthLabel> = ["2025-01", "2024-12", "2024-06"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        labels.sort();
        let ordered: Vec<&str> = labels.iter().map(MonthLabel::as_str).collect();
        assert_eq!(ordered, vec!["2024-06", "2024-12", "2025-01"]);
    }

    #[test]
    fn test_month_label_serializes_transparently() {
        let label: MonthLabel = "2024-06".parse().unwrap();
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"2024-06\"");
    }
}

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_record_month_label() {
        let record = MigrationRecord::new(
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            "Legal",
            12,
            3.5,
        );
        assert_eq!(record.month_label().as_str(), "2024-09");
        assert_eq!(record.business_function, "Legal");
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = MigrationRecord::new(
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            "Legal",
            12,
            3.5,
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"month\":\"2024-09-01\""));
        let back: MigrationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MigboardError::InvalidRecord {
            line: 3,
            message: "bad workspace_count".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid record on line 3: bad workspace_count");
        assert_eq!(MigboardError::EmptyTable.to_string(), "Table is empty");
        assert_eq!(
            MigboardError::video("ffmpeg missing").to_string(),
            "Video encoding error: ffmpeg missing"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MigboardError = io.into();
        assert!(matches!(err, MigboardError::Io(_)));
    }
}
