//! The immutable migration table and its derived cumulative columns.

use migboard_common::{MigrationRecord, MonthLabel};
use std::collections::{BTreeSet, HashMap};

/// A record together with its running totals within its business function.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// The base record.
    pub record: MigrationRecord,
    /// Sum of `data_volume_tb` for this business function up to this month.
    pub cumulative_tb: f64,
    /// Sum of `workspace_count` for this business function up to this month.
    pub cumulative_workspaces: u64,
}

/// Rows sorted by `(month, business_function)` with cumulative totals.
///
/// A table never changes after construction; replacing data means building
/// a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationTable {
    rows: Vec<TableRow>,
}

impl MigrationTable {
    /// Builds a table, sorting the records and computing running totals.
    pub fn from_records(mut records: Vec<MigrationRecord>) -> Self {
        records.sort_by(|a, b| {
            a.month
                .cmp(&b.month)
                .then_with(|| a.business_function.cmp(&b.business_function))
        });

        let mut totals: HashMap<String, (f64, u64)> = HashMap::new();
        let rows = records
            .into_iter()
            .map(|record| {
                let entry = totals
                    .entry(record.business_function.clone())
                    .or_insert((0.0, 0));
                entry.0 += record.data_volume_tb;
                entry.1 += u64::from(record.workspace_count);
                TableRow {
                    cumulative_tb: entry.0,
                    cumulative_workspaces: entry.1,
                    record,
                }
            })
            .collect();

        Self { rows }
    }

    /// Rows in table order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Base records in table order.
    pub fn records(&self) -> impl Iterator<Item = &MigrationRecord> + '_ {
        self.rows.iter().map(|row| &row.record)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct business functions, sorted.
    pub fn business_functions(&self) -> Vec<String> {
        self.records()
            .map(|r| r.business_function.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct month labels in chronological order.
    pub fn month_labels(&self) -> Vec<MonthLabel> {
        self.records()
            .map(MigrationRecord::month_label)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Largest workspace count in the table.
    pub fn max_workspace_count(&self) -> Option<u32> {
        self.records().map(|r| r.workspace_count).max()
    }
}
