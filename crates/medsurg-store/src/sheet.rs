//! # Worksheet Contract
//!
//! The narrow row-level contract the adapters consume.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Worksheet Implementations                            │
//! │                                                                         │
//! │           ┌───────────────── Worksheet ─────────────────┐               │
//! │           │    rows / append_row / update_cell / ...    │               │
//! │           └──────┬──────────────────────────┬───────────┘               │
//! │                  │                          │                           │
//! │        ┌─────────┴─────────┐      ┌─────────┴─────────┐                 │
//! │        │  remote client    │      │  MemoryWorksheet  │                 │
//! │        │  (external crate, │      │  (this module:    │                 │
//! │        │   out of scope)   │      │   tests, dev)     │                 │
//! │        └───────────────────┘      └───────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//! - Rows are vectors of cell strings; the header row is managed by the
//!   implementation and never appears in `rows()`.
//! - Row and column indices are zero-based over DATA rows.
//! - Every call is one network round trip against the real store. There is
//!   no batching, no transaction, no isolation: a snapshot from `rows()`
//!   can be stale before the next call lands.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Worksheet Trait
// =============================================================================

/// Row-level access to one named sheet of the backing store.
#[async_trait]
pub trait Worksheet: Send + Sync {
    /// Sheet name, for error context and logging.
    fn name(&self) -> &str;

    /// Snapshot of all data rows (header excluded), in sheet order.
    async fn rows(&self) -> StoreResult<Vec<Vec<String>>>;

    /// Appends a data row after the last existing row.
    async fn append_row(&self, row: Vec<String>) -> StoreResult<()>;

    /// Overwrites a single cell. `row` and `col` are zero-based over data
    /// rows. Last write wins - there is no version check.
    async fn update_cell(&self, row: usize, col: usize, value: String) -> StoreResult<()>;

    /// Deletes a data row; later rows shift up.
    async fn delete_row(&self, row: usize) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Worksheet
// =============================================================================

/// In-memory [`Worksheet`] used by the test suite and offline development.
///
/// Clones share the same underlying rows, so a test can hold a handle to
/// the sheet it handed to a repository and inspect the rows afterwards.
///
/// ## Fidelity
/// Mirrors the remote store's semantics on purpose: every method is an
/// independent operation with no coordination between calls. It does NOT
/// add the atomicity the real store lacks.
#[derive(Debug, Clone)]
pub struct MemoryWorksheet {
    name: String,
    rows: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MemoryWorksheet {
    /// Creates an empty sheet with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        MemoryWorksheet {
            name: name.into(),
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a sheet pre-seeded with data rows.
    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        MemoryWorksheet {
            name: name.into(),
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<String>>> {
        // A panic elsewhere while the lock was held poisons it; the rows
        // are plain strings and stay usable, so recover instead of
        // cascading the panic
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Worksheet for MemoryWorksheet {
    fn name(&self) -> &str {
        &self.name
    }

    async fn rows(&self) -> StoreResult<Vec<Vec<String>>> {
        Ok(self.lock().clone())
    }

    async fn append_row(&self, row: Vec<String>) -> StoreResult<()> {
        self.lock().push(row);
        Ok(())
    }

    async fn update_cell(&self, row: usize, col: usize, value: String) -> StoreResult<()> {
        let mut rows = self.lock();
        let cells = rows.get_mut(row).ok_or_else(|| StoreError::InvalidRow {
            sheet: self.name.clone(),
            reason: format!("row index {} out of range", row),
        })?;

        // Ragged rows are possible in a hand-edited sheet; widen as needed
        if col >= cells.len() {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value;
        Ok(())
    }

    async fn delete_row(&self, row: usize) -> StoreResult<()> {
        let mut rows = self.lock();
        if row >= rows.len() {
            return Err(StoreError::InvalidRow {
                sheet: self.name.clone(),
                reason: format!("row index {} out of range", row),
            });
        }
        rows.remove(row);
        Ok(())
    }
}

// =============================================================================
// Lenient Cell Parsing
// =============================================================================
// The real store hands every cell back as a string and hand-edited sheets
// accumulate junk. Reads coerce instead of failing: an unparseable count
// becomes 0, an unparseable amount becomes 0.00.

/// Parses an integer cell, tolerating blank cells, whitespace, and
/// spreadsheet-style "3.0" floats.
pub(crate) fn parse_count(cell: &str) -> i64 {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<i64>() {
        return n;
    }
    // "10.0" shows up after a sheet recalculates a column as float
    cell.parse::<f64>().map(|f| f.trunc() as i64).unwrap_or(0)
}

/// Parses a money cell, coercing garbage to zero.
pub(crate) fn parse_amount(cell: &str) -> medsurg_core::Money {
    medsurg_core::Money::parse(cell).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_append_and_read() {
        let ws = MemoryWorksheet::new("Inventory");
        ws.append_row(row(&["Gauze", "10", "5.00"])).await.unwrap();

        let rows = ws.rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], row(&["Gauze", "10", "5.00"]));
    }

    #[tokio::test]
    async fn test_update_cell() {
        let ws = MemoryWorksheet::with_rows("Inventory", vec![row(&["Gauze", "10", "5.00"])]);
        ws.update_cell(0, 1, "7".to_string()).await.unwrap();

        let rows = ws.rows().await.unwrap();
        assert_eq!(rows[0][1], "7");
    }

    #[tokio::test]
    async fn test_update_cell_out_of_range() {
        let ws = MemoryWorksheet::new("Inventory");
        let err = ws.update_cell(3, 0, "x".to_string()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { .. }));
    }

    #[tokio::test]
    async fn test_delete_row_shifts_later_rows() {
        let ws = MemoryWorksheet::with_rows(
            "Inventory",
            vec![row(&["A", "1", "1.00"]), row(&["B", "2", "2.00"])],
        );
        ws.delete_row(0).await.unwrap();

        let rows = ws.rows().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "B");
    }

    #[tokio::test]
    async fn test_reads_survive_a_poisoned_lock() {
        let ws = MemoryWorksheet::with_rows("Inventory", vec![row(&["Gauze", "10", "5.00"])]);

        let handle = ws.clone();
        std::thread::spawn(move || {
            let _guard = handle.lock();
            panic!("poison the lock");
        })
        .join()
        .unwrap_err();

        assert_eq!(ws.rows().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_rows() {
        let ws = MemoryWorksheet::new("Invoices");
        let handle = ws.clone();
        ws.append_row(row(&["1001", "Walk-in", "2024-06-01 10:30:00", "15.00"]))
            .await
            .unwrap();

        assert_eq!(handle.rows().await.unwrap().len(), 1);
    }

    #[test]
    fn test_parse_count_coerces_junk_to_zero() {
        assert_eq!(parse_count("10"), 10);
        assert_eq!(parse_count(" 10 "), 10);
        assert_eq!(parse_count("10.0"), 10);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("lots"), 0);
    }

    #[test]
    fn test_parse_amount_coerces_junk_to_zero() {
        assert_eq!(parse_amount("5.00").pesewas(), 500);
        assert_eq!(parse_amount("n/a").pesewas(), 0);
        assert_eq!(parse_amount("").pesewas(), 0);
    }
}
