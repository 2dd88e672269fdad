//! # Cart
//!
//! The in-progress, not-yet-persisted set of items an operator intends to
//! sell in one transaction.
//!
//! ## Ownership
//! A cart is owned exclusively by one checkout session. Nothing here is
//! persisted until checkout commits; clearing the cart or dropping the
//! session discards it without a trace.
//!
//! ## Price Freezing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_line("Gauze", 3)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartLine captures unit price = 5.00  ◄── price AT ADD TIME             │
//! │       │                                                                 │
//! │  (operator restocks Gauze at 9.00)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  checkout() total = 15.00             ◄── NOT 27.00                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::InventoryItem;

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart: an item name, a quantity, and the unit price
/// frozen at the moment the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item name at time of adding.
    pub item_name: String,

    /// Quantity requested (always >= 1, enforced by the engine).
    pub qty: i64,

    /// Price in pesewas at time of adding (frozen).
    pub unit_price_pesewas: i64,

    /// When this line was added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a cart line from an inventory snapshot, freezing the price.
    pub fn from_item(item: &InventoryItem, qty: i64) -> Self {
        CartLine {
            item_name: item.name.clone(),
            qty,
            unit_price_pesewas: item.unit_price_pesewas,
            added_at: Utc::now(),
        }
    }

    /// Line subtotal in pesewas (qty × frozen unit price).
    #[inline]
    pub fn subtotal_pesewas(&self) -> i64 {
        self.unit_price_pesewas * self.qty
    }

    /// Line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_pesewas(self.subtotal_pesewas())
    }

    /// Frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_pesewas(self.unit_price_pesewas)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart: an ordered list of lines.
///
/// Adding the same item twice appends a second line rather than merging -
/// each add is its own line, and the printed table shows lines in the
/// order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends a line. Validation (positive qty, stock check) happens in
    /// the engine before this is called.
    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Discards all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not total quantity).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Cart total in pesewas: the sum of per-line subtotals computed at
    /// add time, never re-priced at commit time.
    pub fn total_pesewas(&self) -> i64 {
        self.lines.iter().map(|l| l.subtotal_pesewas()).sum()
    }

    /// Cart total as Money.
    pub fn total(&self) -> Money {
        Money::from_pesewas(self.total_pesewas())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
