//! # Engine Error Types
//!
//! The engine's callers see exactly one error type, [`EngineError`]. Most
//! variants are pass-throughs from the layers below; the one the engine
//! itself owns is [`EngineError::PartialCommit`], which classifies store
//! failures that strike AFTER the invoice header row is already written.
//!
//! ## Failure Classification During Checkout
//! ```text
//!   next_invoice_id ──► append_invoice ──► per line: read stock,
//!        │                   │                write stock, append item
//!        │                   │                       │
//!   plain Store error   plain Store error      PartialCommit
//!   (nothing written)   (nothing written)      (header row exists,
//!                                               ledger needs manual
//!                                               reconciliation)
//! ```

use thiserror::Error;

use medsurg_core::{CoreError, ValidationError};
use medsurg_invoice::RenderError;
use medsurg_store::StoreError;

/// Step of the commit sequence that failed after the point of no return.
///
/// Printed in the PartialCommit message so the operator knows WHAT to
/// check in the ledger, not just that something broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStep {
    /// Re-reading an item's current stock before the decrement write.
    StockRead,
    /// Writing the decremented stock quantity.
    StockWrite,
    /// Appending a line-item row to the ledger.
    LineItemAppend,
}

impl std::fmt::Display for CommitStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CommitStep::StockRead => "stock read",
            CommitStep::StockWrite => "stock write",
            CommitStep::LineItemAppend => "line item append",
        };
        write!(f, "{}", label)
    }
}

/// All errors the transaction engine can surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Business rule violation (validation, unknown item, stock check).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Store failure before any ledger row was written. Safe to retry.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Store failure AFTER the invoice header row was written.
    ///
    /// The ledger now holds a header that line items and stock levels may
    /// not fully back. Retrying blindly would mint a second invoice, so
    /// this variant carries everything a manual reconciliation needs.
    #[error(
        "Invoice {invoice_id} was partially committed: {operation} failed ({source}). \
         The invoice header row exists; reconcile line items and stock by hand"
    )]
    PartialCommit {
        invoice_id: i64,
        operation: CommitStep,
        #[source]
        source: StoreError,
    },

    /// The committed invoice could not be rendered to a document.
    ///
    /// The sale itself is durable when this fires - only the paperwork
    /// failed. Callers can re-render from the ledger.
    #[error(transparent)]
    Render(#[from] RenderError),
}

// ValidationError arrives via CoreError so callers match one variant for
// all business rule failures
impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::Core(CoreError::Validation(err))
    }
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_commit_message_names_step_and_invoice() {
        let err = EngineError::PartialCommit {
            invoice_id: 1001,
            operation: CommitStep::StockWrite,
            source: StoreError::connection("socket closed"),
        };

        let msg = err.to_string();
        assert!(msg.contains("1001"));
        assert!(msg.contains("stock write"));
        assert!(msg.contains("reconcile"));
    }

    #[test]
    fn test_validation_error_wraps_as_core() {
        let err: EngineError = ValidationError::EmptyCart.into();
        assert!(matches!(err, EngineError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_commit_step_labels() {
        assert_eq!(CommitStep::StockRead.to_string(), "stock read");
        assert_eq!(CommitStep::LineItemAppend.to_string(), "line item append");
    }
}
