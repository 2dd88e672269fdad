//! # medsurg-store: Backing-Store Layer for Medsurg POS
//!
//! Typed access to the three sheets of the remote tabular store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Medsurg POS Data Flow                             │
//! │                                                                         │
//! │  medsurg-engine (checkout, restock)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  medsurg-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │   Worksheet   │   │    Catalog     │   │    Ledger     │  │   │
//! │  │   │  (contract)   │◄──│  Repository    │   │  Repository   │  │   │
//! │  │   │               │   │                │   │               │  │   │
//! │  │   │ rows()        │   │ list_items     │   │ next_invoice_ │  │   │
//! │  │   │ append_row()  │   │ upsert_item    │   │     id        │  │   │
//! │  │   │ update_cell() │   │ delete_item    │   │ append_*      │  │   │
//! │  │   │ delete_row()  │   │ set_stock      │   │ list_invoices │  │   │
//! │  │   └───────┬───────┘   └────────────────┘   └───────────────┘  │   │
//! │  └───────────│─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  Remote tabular store: Inventory / Invoices / Invoice_Items             │
//! │  (network API, last write wins, NO multi-row atomicity)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`sheet`] - The `Worksheet` row contract and the in-memory implementation
//! - [`catalog`] - Typed access to inventory rows
//! - [`ledger`] - Typed access to invoice header and line-item rows
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medsurg_store::{CatalogRepository, LedgerRepository, MemoryWorksheet};
//!
//! let catalog = CatalogRepository::new(MemoryWorksheet::new("Inventory"));
//! let item = catalog.upsert_item("Gauze", 10, Money::from_pesewas(500)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod sheet;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CatalogRepository;
pub use error::{StoreError, StoreResult};
pub use ledger::LedgerRepository;
pub use sheet::{MemoryWorksheet, Worksheet};
