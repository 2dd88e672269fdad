//! # Catalog Repository
//!
//! Typed read/write access to the `Inventory` sheet.
//!
//! ## Sheet Layout
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Inventory                                   │
//! │                                             │
//! │ Item Name      │ Stock Qty │ Unit Price     │  ← header (not in rows())
//! │ Gauze          │ 10        │ 5.00           │
//! │ Surgical Tape  │ 4         │ 12.50          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! Every method is an independent round trip. `upsert_item` and
//! `set_stock` read a snapshot, locate the row, then write - between those
//! two steps another writer can move or change the row. The store offers
//! nothing to prevent that; callers that care serialize access themselves.

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::sheet::{parse_amount, parse_count, Worksheet};
use medsurg_core::{InventoryItem, Money};

// Column positions in the Inventory sheet
const COL_NAME: usize = 0;
const COL_STOCK: usize = 1;
const COL_PRICE: usize = 2;

/// Repository for inventory row operations.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = CatalogRepository::new(inventory_sheet);
///
/// let items = catalog.list_items().await?;
/// let gauze = catalog.upsert_item("Gauze", 10, Money::from_pesewas(500)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository<W: Worksheet> {
    sheet: W,
}

impl<W: Worksheet> CatalogRepository<W> {
    /// Creates a new CatalogRepository over the `Inventory` sheet.
    pub fn new(sheet: W) -> Self {
        CatalogRepository { sheet }
    }

    /// Returns a snapshot of every inventory item, in sheet order.
    ///
    /// Numeric cells are coerced leniently: unparseable stock becomes 0,
    /// unparseable price becomes 0.00. A ragged row (fewer than three
    /// cells) reads as empty cells rather than failing the whole listing.
    pub async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows = self.sheet.rows().await?;
        debug!(count = rows.len(), "Listing inventory items");

        Ok(rows.iter().map(|row| item_from_row(row)).collect())
    }

    /// Looks up a single item by exact (case-sensitive) name.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - name found
    /// * `Ok(None)` - no matching row
    pub async fn get_item(&self, name: &str) -> StoreResult<Option<InventoryItem>> {
        let rows = self.sheet.rows().await?;

        Ok(rows
            .iter()
            .find(|row| cell(row, COL_NAME) == name)
            .map(|row| item_from_row(row)))
    }

    /// Creates or restocks an item.
    ///
    /// ## Behavior
    /// - Name exists: ADD `delta_qty` to the current stock, REPLACE the price
    /// - Name absent: append a new row with stock = `delta_qty`
    ///
    /// ## Returns
    /// The resulting item, so callers can report the new stock level.
    pub async fn upsert_item(
        &self,
        name: &str,
        delta_qty: i64,
        new_price: Money,
    ) -> StoreResult<InventoryItem> {
        debug!(name = %name, delta = %delta_qty, price = %new_price, "Upserting item");

        let rows = self.sheet.rows().await?;

        if let Some(idx) = rows.iter().position(|row| cell(row, COL_NAME) == name) {
            let new_qty = parse_count(cell(&rows[idx], COL_STOCK)) + delta_qty;

            self.sheet
                .update_cell(idx, COL_STOCK, new_qty.to_string())
                .await?;
            self.sheet
                .update_cell(idx, COL_PRICE, new_price.to_decimal_string())
                .await?;

            Ok(InventoryItem {
                name: name.to_string(),
                stock_qty: new_qty,
                unit_price_pesewas: new_price.pesewas(),
            })
        } else {
            self.sheet
                .append_row(vec![
                    name.to_string(),
                    delta_qty.to_string(),
                    new_price.to_decimal_string(),
                ])
                .await?;

            Ok(InventoryItem {
                name: name.to_string(),
                stock_qty: delta_qty,
                unit_price_pesewas: new_price.pesewas(),
            })
        }
    }

    /// Deletes an item row by name.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - no matching row; the sheet is left
    ///   untouched
    pub async fn delete_item(&self, name: &str) -> StoreResult<()> {
        debug!(name = %name, "Deleting item");

        let rows = self.sheet.rows().await?;
        let idx = rows
            .iter()
            .position(|row| cell(row, COL_NAME) == name)
            .ok_or_else(|| StoreError::not_found("InventoryItem", name))?;

        self.sheet.delete_row(idx).await
    }

    /// Writes an absolute stock quantity for an existing item.
    ///
    /// Used by the engine after a sale: it reads the current stock,
    /// subtracts the sold quantity, and writes the result here. The value
    /// may legally be negative when a concurrent session already consumed
    /// the stock - this method does not re-validate.
    pub async fn set_stock(&self, name: &str, absolute_qty: i64) -> StoreResult<()> {
        debug!(name = %name, qty = %absolute_qty, "Setting stock");

        let rows = self.sheet.rows().await?;
        let idx = rows
            .iter()
            .position(|row| cell(row, COL_NAME) == name)
            .ok_or_else(|| StoreError::not_found("InventoryItem", name))?;

        self.sheet
            .update_cell(idx, COL_STOCK, absolute_qty.to_string())
            .await
    }
}

// =============================================================================
// Row Codec
// =============================================================================

/// Reads a cell, treating a missing cell in a ragged row as empty.
fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

/// Decodes one inventory row, coercing numeric junk to zero.
fn item_from_row(row: &[String]) -> InventoryItem {
    InventoryItem {
        name: cell(row, COL_NAME).to_string(),
        stock_qty: parse_count(cell(row, COL_STOCK)),
        unit_price_pesewas: parse_amount(cell(row, COL_PRICE)).pesewas(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
