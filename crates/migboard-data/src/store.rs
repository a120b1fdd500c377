//! Shared table storage with arc-swap for lock-free snapshot reads.

use crate::table::MigrationTable;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Holds the current migration table.
///
/// Readers take an `Arc` snapshot that stays valid and unchanged even if an
/// upload swaps in a new table while they are still using it.
pub struct TableStore {
    table: ArcSwap<MigrationTable>,
}

impl TableStore {
    /// Creates a store holding `table`.
    pub fn new(table: MigrationTable) -> Self {
        Self {
            table: ArcSwap::from_pointee(table),
        }
    }

    /// Gets the current table.
    pub fn snapshot(&self) -> Arc<MigrationTable> {
        self.table.load_full()
    }

    /// Replaces the whole table atomically, returning the new row count.
    pub fn replace(&self, table: MigrationTable) -> usize {
        let rows = table.len();
        let previous = self.table.swap(Arc::new(table));
        info!(rows, previous_rows = previous.len(), "Replaced migration table");
        rows
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new(MigrationTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migboard_common::test_utils::record_fixtures::small_records;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = TableStore::new(MigrationTable::from_records(small_records()));
        let before = store.snapshot();

        let rows = store.replace(MigrationTable::default());

        assert_eq!(rows, 0);
        assert_eq!(before.len(), 6);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_tables() {
        let store = Arc::new(TableStore::new(MigrationTable::from_records(small_records())));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let len = store.snapshot().len();
                        assert!(len == 6 || len == 0);
                    }
                })
            })
            .collect();

        for i in 0..50 {
            if i % 2 == 0 {
                store.replace(MigrationTable::default());
            } else {
                store.replace(MigrationTable::from_records(small_records()));
            }
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
