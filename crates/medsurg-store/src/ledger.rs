//! # Ledger Repository
//!
//! Typed access to the `Invoices` and `Invoice_Items` sheets.
//!
//! ## Sheet Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Invoices                                                 │
//! │ Invoice ID │ Customer Name │ Date                │ Total │
//! │ 1001       │ Walk-in       │ 2024-06-01 10:30:00 │ 15.00 │
//! ├──────────────────────────────────────────────────────────┤
//! │ Invoice_Items                                            │
//! │ Invoice ID │ Item Name     │ Qty │ Subtotal               │
//! │ 1001       │ Gauze         │ 3   │ 15.00                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invoice Numbering
//! `next_invoice_id` derives from a row count, NOT from a counter service:
//! offset + header-inclusive row count. Two concurrent commits can read
//! the same count and mint the same identifier. That race is part of the
//! accepted contract (see the engine's design notes); this repository
//! just implements the policy.

use tracing::debug;

use crate::error::StoreResult;
use crate::sheet::{parse_amount, parse_count, Worksheet};
use medsurg_core::{Invoice, InvoiceLineItem, INVOICE_ID_OFFSET};

// Column positions in the Invoices sheet
const COL_INV_ID: usize = 0;
const COL_INV_CUSTOMER: usize = 1;
const COL_INV_DATE: usize = 2;
const COL_INV_TOTAL: usize = 3;

// Column positions in the Invoice_Items sheet
const COL_ITEM_INV_ID: usize = 0;
const COL_ITEM_NAME: usize = 1;
const COL_ITEM_QTY: usize = 2;
const COL_ITEM_SUBTOTAL: usize = 3;

/// Repository for invoice header and line-item rows.
///
/// Append-only from the engine's point of view: nothing here updates or
/// deletes a committed invoice.
#[derive(Debug, Clone)]
pub struct LedgerRepository<W: Worksheet> {
    invoices: W,
    items: W,
}

impl<W: Worksheet> LedgerRepository<W> {
    /// Creates a new LedgerRepository over the two ledger sheets.
    pub fn new(invoices: W, items: W) -> Self {
        LedgerRepository { invoices, items }
    }

    /// Derives the next invoice identifier from the current row count.
    ///
    /// Policy: `offset + data rows + 1` - the `+ 1` accounts for the
    /// header row, so an empty ledger yields 1001. NOT unique under
    /// concurrent writers; see the module docs.
    pub async fn next_invoice_id(&self) -> StoreResult<i64> {
        let rows = self.invoices.rows().await?;
        let id = INVOICE_ID_OFFSET + rows.len() as i64 + 1;

        debug!(invoice_id = %id, existing = rows.len(), "Derived next invoice id");
        Ok(id)
    }

    /// Appends an invoice header row.
    pub async fn append_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        debug!(invoice_id = %invoice.invoice_id, total = %invoice.total(), "Appending invoice header");

        self.invoices
            .append_row(vec![
                invoice.invoice_id.to_string(),
                invoice.customer_name.clone(),
                invoice.timestamp.clone(),
                invoice.total().to_decimal_string(),
            ])
            .await
    }

    /// Appends one line-item row.
    pub async fn append_line_item(&self, item: &InvoiceLineItem) -> StoreResult<()> {
        self.items
            .append_row(vec![
                item.invoice_id.to_string(),
                item.item_name.clone(),
                item.qty.to_string(),
                item.subtotal().to_decimal_string(),
            ])
            .await
    }

    /// Appends a batch of line-item rows, one append per row - the store
    /// has no batch primitive, so a failure can leave a prefix written.
    pub async fn append_line_items(&self, items: &[InvoiceLineItem]) -> StoreResult<()> {
        for item in items {
            self.append_line_item(item).await?;
        }
        Ok(())
    }

    /// Snapshot of all committed invoices, for the records view.
    pub async fn list_invoices(&self) -> StoreResult<Vec<Invoice>> {
        let rows = self.invoices.rows().await?;
        debug!(count = rows.len(), "Listing invoices");

        Ok(rows
            .iter()
            .map(|row| Invoice {
                invoice_id: parse_count(cell(row, COL_INV_ID)),
                customer_name: cell(row, COL_INV_CUSTOMER).to_string(),
                timestamp: cell(row, COL_INV_DATE).to_string(),
                total_pesewas: parse_amount(cell(row, COL_INV_TOTAL)).pesewas(),
            })
            .collect())
    }

    /// Snapshot of all line-item rows, for reporting and reconciliation.
    pub async fn list_line_items(&self) -> StoreResult<Vec<InvoiceLineItem>> {
        let rows = self.items.rows().await?;

        Ok(rows
            .iter()
            .map(|row| InvoiceLineItem {
                invoice_id: parse_count(cell(row, COL_ITEM_INV_ID)),
                item_name: cell(row, COL_ITEM_NAME).to_string(),
                qty: parse_count(cell(row, COL_ITEM_QTY)),
                subtotal_pesewas: parse_amount(cell(row, COL_ITEM_SUBTOTAL)).pesewas(),
            })
            .collect())
    }
}

/// Reads a cell, treating a missing cell in a ragged row as empty.
fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

// =============================================================================
// Unit Tests
// =============================================================================
