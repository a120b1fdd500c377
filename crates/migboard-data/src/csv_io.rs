//! CSV upload and download of migration tables.

use crate::table::MigrationTable;
use migboard_common::{format_month, parse_month, MigboardError, MigrationRecord, Result};
use serde::Serialize;
use std::io::{Read, Write};
use tracing::debug;

/// Month column name.
pub const COL_MONTH: &str = "month";
/// Business function column name.
pub const COL_BUSINESS_FUNCTION: &str = "business_function";
/// Workspace count column name.
pub const COL_WORKSPACE_COUNT: &str = "workspace_count";
/// Data volume column name.
pub const COL_DATA_VOLUME_TB: &str = "data_volume_tb";

/// Header written on download.
pub const DOWNLOAD_HEADER: [&str; 6] = [
    COL_MONTH,
    COL_BUSINESS_FUNCTION,
    COL_WORKSPACE_COUNT,
    COL_DATA_VOLUME_TB,
    "cumulative_tb",
    "cumulative_workspaces",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    month: String,
    business_function: &'a str,
    workspace_count: u32,
    data_volume_tb: f64,
    cumulative_tb: f64,
    cumulative_workspaces: u64,
}

struct ColumnIndex {
    month: usize,
    business_function: usize,
    workspace_count: usize,
    data_volume_tb: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| MigboardError::Csv(format!("missing column '{name}'")))
        };

        Ok(Self {
            month: find(COL_MONTH)?,
            business_function: find(COL_BUSINESS_FUNCTION)?,
            workspace_count: find(COL_WORKSPACE_COUNT)?,
            data_volume_tb: find(COL_DATA_VOLUME_TB)?,
        })
    }
}

fn csv_error(err: &csv::Error) -> MigboardError {
    MigboardError::Csv(err.to_string())
}

/// Reads a table from CSV with a header row.
///
/// Columns are located by name, so their order does not matter and extra
/// columns such as the cumulative totals of a previous download are ignored.
/// Cumulative totals are always recomputed.
pub fn read_table<R: Read>(reader: R) -> Result<MigrationTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| csv_error(&e))?.clone();
    let columns = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| csv_error(&e))?;
        let line = row.position().map_or(0, csv::Position::line);
        let field = |i: usize| row.get(i).unwrap_or_default();
        let invalid = |message: String| MigboardError::InvalidRecord { line, message };

        let raw_month = field(columns.month);
        let month = parse_month(raw_month)
            .ok_or_else(|| invalid(format!("unparseable month '{raw_month}'")))?;

        let business_function = field(columns.business_function);
        if business_function.is_empty() {
            return Err(invalid("empty business_function".to_string()));
        }

        let raw_count = field(columns.workspace_count);
        let workspace_count: u32 = raw_count
            .parse()
            .map_err(|e| invalid(format!("workspace_count '{raw_count}': {e}")))?;

        let raw_volume = field(columns.data_volume_tb);
        let data_volume_tb: f64 = raw_volume
            .parse()
            .map_err(|e| invalid(format!("data_volume_tb '{raw_volume}': {e}")))?;
        if !data_volume_tb.is_finite() || data_volume_tb < 0.0 {
            return Err(invalid(format!(
                "data_volume_tb '{raw_volume}' must be a non-negative number"
            )));
        }

        records.push(MigrationRecord::new(
            month,
            business_function,
            workspace_count,
            data_volume_tb,
        ));
    }

    debug!(rows = records.len(), "Parsed CSV upload");
    Ok(MigrationTable::from_records(records))
}

/// Writes a table as CSV including the cumulative columns.
pub fn write_table<W: Write>(table: &MigrationTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so an empty table still yields a header.
    wtr.write_record(DOWNLOAD_HEADER)
        .map_err(|e| csv_error(&e))?;

    for row in table.rows() {
        wtr.serialize(CsvRow {
            month: format_month(row.record.month),
            business_function: &row.record.business_function,
            workspace_count: row.record.workspace_count,
            data_volume_tb: row.record.data_volume_tb,
            cumulative_tb: row.cumulative_tb,
            cumulative_workspaces: row.cumulative_workspaces,
        })
        .map_err(|e| csv_error(&e))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Serializes a table to CSV bytes.
pub fn table_to_csv(table: &MigrationTable) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(64 * (table.len() + 1));
    write_table(table, &mut buf)?;
    Ok(buf)
}
