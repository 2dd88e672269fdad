//! # medsurg-engine: Transaction Engine for Medsurg POS
//!
//! The orchestration layer a point-of-sale front end talks to. Owns the
//! checkout session lifecycle and the commit sequence; delegates domain
//! math to medsurg-core, row access to medsurg-store and document layout
//! to medsurg-invoice.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Medsurg POS Architecture                           │
//! │                                                                         │
//! │   Presentation layer (out of scope)                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ★ medsurg-engine (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   TransactionEngine          CheckoutSession                    │   │
//! │  │   ├── add_line               Empty ─► Building ─► Committing    │   │
//! │  │   ├── clear_cart                          │      ┌────┴────┐    │   │
//! │  │   ├── checkout                            │  Committed  Failed  │   │
//! │  │   ├── restock / remove_item               └──────────────┘      │   │
//! │  │   └── inventory / invoices                                      │   │
//! │  └──────┬──────────────────────┬──────────────────────┬───────────┘   │
//! │         ▼                      ▼                      ▼                │
//! │   medsurg-core           medsurg-store          medsurg-invoice        │
//! │   (pure logic)           (sheet rows)           (PDF document)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - TransactionEngine and the commit sequence
//! - [`session`] - CheckoutSession state machine
//! - [`error`] - EngineError, including PartialCommit classification

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{CheckoutReceipt, TransactionEngine};
pub use error::{CommitStep, EngineError, EngineResult};
pub use session::{CheckoutSession, SessionState};
