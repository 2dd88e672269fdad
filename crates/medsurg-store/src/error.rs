//! # Store Error Types
//!
//! Error types for backing-store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Worksheet round trip fails (network, credentials, bad index)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds entity/sheet context                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (medsurg-engine) ← Unmodified, or wrapped as               │
//! │       │                          PartialCommit if prior writes landed   │
//! │       ▼                                                                 │
//! │  Operator sees which operation failed                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine adds NO retry logic: a connection failure is fatal to the
//! current operation and is surfaced as-is.

use thiserror::Error;

/// Backing-store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable or credentials invalid.
    ///
    /// ## When This Occurs
    /// - Network down or API endpoint unreachable
    /// - Service-account credentials rejected
    /// - Timeout inside the worksheet client (treated the same way)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Referenced row not found.
    ///
    /// ## When This Occurs
    /// - Deleting an item name with no matching row
    /// - Writing stock for a name that was deleted out from under us
    #[error("{entity} not found: {name}")]
    NotFound { entity: String, name: String },

    /// A row came back with the wrong shape (arity, not content - numeric
    /// cells that fail to parse are coerced to zero instead, matching the
    /// store's lenient read policy).
    #[error("Invalid row in {sheet}: {reason}")]
    InvalidRow { sheet: String, reason: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and name.
    pub fn not_found(entity: impl Into<String>, name: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// Creates a Connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("InventoryItem", "Gauze");
        assert_eq!(err.to_string(), "InventoryItem not found: Gauze");

        let err = StoreError::connection("credentials rejected");
        assert_eq!(err.to_string(), "Connection error: credentials rejected");
    }
}
