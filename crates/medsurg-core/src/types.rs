//! # Domain Types
//!
//! Core domain types used throughout Medsurg POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InventoryItem  │   │     Invoice     │   │ InvoiceLineItem │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  invoice_id     │   │  invoice_id (FK)│       │
//! │  │  stock_qty      │   │  customer_name  │   │  item_name      │       │
//! │  │  unit_price     │   │  timestamp      │   │  qty            │       │
//! │  │                 │   │  total_amount   │   │  subtotal       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  InventoryItem 1──N InvoiceLineItem   (by name, not enforced)          │
//! │  Invoice       1──N InvoiceLineItem   (by invoice_id)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The item name is the unique business key - case-sensitive, non-empty.
//! There is no surrogate key in the backing store; relationships are by
//! name and invoice number only, with no referential enforcement.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Inventory Item
// =============================================================================

/// A stocked product, one row in the `Inventory` sheet.
///
/// ## Lifecycle
/// - Created on the first restock of a new name
/// - Mutated on subsequent restocks: quantity ADDED, price REPLACED
/// - Deleted explicitly by name
///
/// ## Invariant
/// `stock_qty` is never observed negative after a committed sale in a
/// single-session run. Concurrent sessions can overcommit (no locks in the
/// backing store) and drive it negative - accepted, see medsurg-engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique business key (case-sensitive, non-empty).
    pub name: String,

    /// Units on hand.
    pub stock_qty: i64,

    /// Current selling price in pesewas.
    pub unit_price_pesewas: i64,
}

impl InventoryItem {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_pesewas(self.unit_price_pesewas)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A committed sale header, one row in the `Invoices` sheet.
///
/// Created exactly once per successful checkout, immutable thereafter,
/// never deleted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Plain increasing integer derived from the ledger row count plus a
    /// fixed offset. Duplicates are possible under concurrent commits.
    pub invoice_id: i64,

    /// Customer name, defaults to the walk-in placeholder.
    pub customer_name: String,

    /// Local clock at commit time, formatted "YYYY-MM-DD HH:MM:SS".
    pub timestamp: String,

    /// Sum of the line-item subtotals, in pesewas.
    pub total_pesewas: i64,
}

impl Invoice {
    /// Returns the invoice total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_pesewas(self.total_pesewas)
    }
}

// =============================================================================
// Invoice Line Item
// =============================================================================

/// One sold line, one row in the `Invoice_Items` sheet.
///
/// Created in lockstep with the [`Invoice`] it belongs to, one per cart
/// line. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Foreign key to [`Invoice::invoice_id`].
    pub invoice_id: i64,

    /// Item name at time of sale. Links back to the inventory by name
    /// only - a later rename or delete of the item does not touch this.
    pub item_name: String,

    /// Quantity sold.
    pub qty: i64,

    /// Line subtotal in pesewas (qty × unit price at add time).
    pub subtotal_pesewas: i64,
}

impl InvoiceLineItem {
    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_pesewas(self.subtotal_pesewas)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_item_price_accessor() {
        let item = InventoryItem {
            name: "Gauze".to_string(),
            stock_qty: 10,
            unit_price_pesewas: 500,
        };
        assert_eq!(item.unit_price(), Money::from_pesewas(500));
    }

    #[test]
    fn test_invoice_total_accessor() {
        let invoice = Invoice {
            invoice_id: 1001,
            customer_name: "Walk-in".to_string(),
            timestamp: "2024-06-01 10:30:00".to_string(),
            total_pesewas: 1500,
        };
        assert_eq!(invoice.total().to_decimal_string(), "15.00");
    }

    #[test]
    fn test_line_item_serde_round_trip() {
        let line = InvoiceLineItem {
            invoice_id: 1001,
            item_name: "Gauze".to_string(),
            qty: 3,
            subtotal_pesewas: 1500,
        };
        let json = serde_json::to_string(&line).unwrap();
        let back: InvoiceLineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
