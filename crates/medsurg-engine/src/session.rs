//! # Checkout Session
//!
//! One operator's in-progress sale: a cart plus a lifecycle state.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Lifecycle                       │
//! │                                                                     │
//! │            add_line                checkout                         │
//! │   Empty ──────────► Building ──────────────► Committing             │
//! │     ▲                  │  ▲                      │                  │
//! │     │   clear_cart     │  │ add_line             │                  │
//! │     └──────────────────┘  │                 ┌────┴────┐             │
//! │                           │            success       failure       │
//! │                           │                 │            │          │
//! │                           │                 ▼            ▼          │
//! │                           │            Committed      Failed        │
//! │                           │            (terminal)       │           │
//! │                           └──────────────────────────────┘          │
//! │                                  cart preserved, retryable          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Failed` keeps the cart intact so the operator can retry checkout or
//! edit the cart. `Committed` is terminal - a fresh session starts the
//! next sale, never a reused one.

use uuid::Uuid;

use medsurg_core::{Cart, CoreError};

/// Lifecycle state of a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No lines yet.
    Empty,
    /// At least one line in the cart.
    Building,
    /// Checkout is running; the cart is frozen.
    Committing,
    /// Checkout succeeded. Terminal.
    Committed,
    /// Checkout failed. Cart preserved, retry allowed.
    Failed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionState::Empty => "empty",
            SessionState::Building => "building",
            SessionState::Committing => "committing",
            SessionState::Committed => "committed",
            SessionState::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// One sale in progress.
///
/// The session owns the cart; the engine mutates both together so state
/// and contents never drift apart.
#[derive(Debug)]
pub struct CheckoutSession {
    id: Uuid,
    pub(crate) cart: Cart,
    pub(crate) state: SessionState,
}

impl CheckoutSession {
    /// Starts a fresh, empty session.
    pub fn new() -> Self {
        CheckoutSession {
            id: Uuid::new_v4(),
            cart: Cart::new(),
            state: SessionState::Empty,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read access to the cart for UI display.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Guards cart mutation and checkout entry.
    ///
    /// Allowed from `Empty`, `Building` and `Failed` (retry). Refused
    /// from `Committing` (a commit is mid-flight) and `Committed`.
    pub(crate) fn ensure_can_modify(&self) -> Result<(), CoreError> {
        match self.state {
            SessionState::Empty | SessionState::Building | SessionState::Failed => Ok(()),
            SessionState::Committing | SessionState::Committed => {
                Err(CoreError::InvalidSessionState {
                    session_id: self.id.to_string(),
                    current_state: self.state.to_string(),
                })
            }
        }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
