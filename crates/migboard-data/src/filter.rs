//! Category and month filtering over a table snapshot.

use crate::table::{MigrationTable, TableRow};
use migboard_common::{MonthLabel, Result};

/// Query value meaning "do not filter".
pub const ALL_SENTINEL: &str = "__all";

/// Either everything or one specific value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    /// No filtering.
    #[default]
    All,
    /// Keep only rows equal to this value.
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this selection.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// Returns `None` for absent, blank or sentinel query values.
fn selected(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

impl Selection<String> {
    /// Builds a category selection from an optional query value.
    pub fn from_query(raw: Option<&str>) -> Self {
        selected(raw).map_or(Self::All, |v| Self::Only(v.to_string()))
    }
}

impl Selection<MonthLabel> {
    /// Builds a month selection from an optional `YYYY-MM` query value.
    pub fn parse_query(raw: Option<&str>) -> Result<Self> {
        selected(raw).map_or(Ok(Self::All), |v| Ok(Self::Only(v.parse()?)))
    }
}

/// A surviving row with its month label attached.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    /// The row, copied out of the table.
    pub row: TableRow,
    /// `YYYY-MM` label of the row's month.
    pub month_label: MonthLabel,
}

/// Returns copies of the rows matching both selections, in table order.
pub fn filter_rows(
    table: &MigrationTable,
    business_function: &Selection<String>,
    month: &Selection<MonthLabel>,
) -> Vec<LabeledRow> {
    table
        .rows()
        .iter()
        .filter(|row| business_function.matches(&row.record.business_function))
        .filter_map(|row| {
            let month_label = row.record.month_label();
            month.matches(&month_label).then(|| LabeledRow {
                row: row.clone(),
                month_label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use migboard_common::test_utils::record_fixtures::small_records;

    fn table() -> MigrationTable {
        MigrationTable::from_records(small_records())
    }

    #[test]
    fn test_query_parsing() {
        assert_eq!(Selection::<String>::from_query(None), Selection::All);
        assert_eq!(Selection::<String>::from_query(Some("")), Selection::All);
        assert_eq!(Selection::<String>::from_query(Some("__all")), Selection::All);
        assert_eq!(
            Selection::<String>::from_query(Some("HR")),
            Selection::Only("HR".to_string())
        );

        assert_eq!(
            Selection::<MonthLabel>::parse_query(Some("__all")).unwrap(),
            Selection::All
        );
        assert!(Selection::<MonthLabel>::parse_query(Some("June")).is_err());
    }

    #[test]
    fn test_all_is_pass_through() {
        let table = table();
        let rows = filter_rows(&table, &Selection::All, &Selection::All);
        assert_eq!(rows.len(), table.len());
        assert!(rows
            .iter()
            .zip(table.rows())
            .all(|(labeled, row)| &labeled.row == row));
    }

    #[test]
    fn test_category_and_month() {
        let table = table();
        let month = Selection::parse_query(Some("2024-07")).unwrap();
        let rows = filter_rows(&table, &Selection::Only("HR".to_string()), &month);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row.record.workspace_count, 6);
        assert_eq!(rows[0].month_label.as_str(), "2024-07");
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let rows = filter_rows(&table(), &Selection::Only("Legal".to_string()), &Selection::All);
        assert!(rows.is_empty());
    }
}
