//! # medsurg-core: Pure Business Logic for Medsurg POS
//!
//! This crate is the **heart** of Medsurg POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Medsurg POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (out of scope)                  │   │
//! │  │    Restock form ──► Cart UI ──► Checkout ──► PDF download      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                      medsurg-engine                             │   │
//! │  │    add_line, checkout, restock, remove_item                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medsurg-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ Inventory │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Invoice  │  │ (pesewas) │  │ CartLine  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO BACKING STORE • NO NETWORK • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Invoice, InvoiceLineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The transient, not-yet-persisted cart
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Worksheet, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in pesewas (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use medsurg_core::Money` instead of
// `use medsurg_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer name recorded when the operator leaves the field blank.
pub const WALK_IN_CUSTOMER: &str = "Walk-in";

/// Fixed offset added to the ledger row count when assigning invoice
/// identifiers. With an empty ledger (header row only) the first invoice
/// is 1001.
///
/// NOT unique under concurrent writers - two terminals committing at the
/// same moment can both derive the same identifier. Accepted contract,
/// see the design notes in medsurg-engine.
pub const INVOICE_ID_OFFSET: i64 = 1000;

/// Timestamp format recorded on invoice headers and printed on the
/// document. Local clock at commit time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Currency code printed on the grand-total line of the invoice.
/// Single unit of account - no conversion anywhere in the system.
pub const CURRENCY_CODE: &str = "GHS";
