//! # Error Types
//!
//! Domain-specific error types for medsurg-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medsurg-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  medsurg-store errors (separate crate)                                  │
//! │  └── StoreError       - Backing-store round-trip failures               │
//! │                                                                         │
//! │  medsurg-engine errors                                                  │
//! │  └── EngineError      - Everything above, plus PartialCommit            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → operator             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, available qty, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-friendly messages by the presentation layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item name absent from the inventory snapshot.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Not enough stock to cover the requested quantity.
    ///
    /// ## When This Occurs
    /// Advisory pre-check during `add_line` only. It does NOT reserve
    /// stock: two sessions adding the same item can both pass this check
    /// and overcommit at checkout.
    ///
    /// ## User Workflow
    /// ```text
    /// add_line("Gauze", 5)
    ///      │
    ///      ▼
    /// Read stock: available=2
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Gauze", available: 2, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Low stock! Only 2 left." - operator adjusts qty
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Session is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Adding lines to a committed session
    /// - Calling checkout on a committed session
    #[error("Session {session_id} is {current_state}, cannot perform operation")]
    InvalidSessionState {
        session_id: String,
        current_state: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before any store round trip happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive (>= 1).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Checkout was invoked with zero cart lines. Checkout never commits
    /// an empty invoice.
    #[error("Cart is empty")]
    EmptyCart,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
