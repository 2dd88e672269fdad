//! # Transaction Engine
//!
//! Orchestrates the operations a point-of-sale front end needs: building
//! a cart, committing a sale, restocking and pruning the catalog.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ checkout(session, customer)                                         │
//! │                                                                     │
//! │  1. derive invoice id from ledger row count   ──► plain error       │
//! │  2. append invoice header row                 ──► plain error       │
//! │  ── point of no return ──────────────────────────────────────────── │
//! │  3. per cart line:                                                  │
//! │       read current stock                      ──► PartialCommit     │
//! │       write stock - qty (absolute)            ──► PartialCommit     │
//! │       append line-item row                    ──► PartialCommit     │
//! │  4. render the document                       ──► Render error      │
//! │     (sale is durable; only paperwork failed)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overcommit
//! The stock check in `add_line` is advisory. Between the check and the
//! commit another terminal can sell the same units; the commit then writes
//! whatever `current - qty` is, negative included. The ledger stays
//! truthful about what was sold, and negative stock is the restock
//! operator's signal, not an engine error.

use chrono::Local;
use tracing::{debug, info, warn};

use medsurg_core::{
    validation, CoreError, InventoryItem, Invoice, InvoiceLineItem, Money, CartLine,
    TIMESTAMP_FORMAT,
};
use medsurg_invoice::{invoice_filename, render_invoice, CompanyIdentity};
use medsurg_store::{CatalogRepository, LedgerRepository, StoreError, Worksheet};

use crate::error::{CommitStep, EngineError, EngineResult};
use crate::session::{CheckoutSession, SessionState};

/// Everything the front end needs after a successful checkout.
#[derive(Debug)]
pub struct CheckoutReceipt {
    pub invoice_id: i64,
    pub total: Money,
    /// Conventional download filename, `Invoice_<id>.pdf`.
    pub filename: String,
    /// The rendered document bytes.
    pub pdf: Vec<u8>,
}

/// The transaction engine.
///
/// Cheap to clone; the repositories inside share their worksheets.
///
/// ## Usage
/// ```rust,ignore
/// let engine = TransactionEngine::new(catalog, ledger, CompanyIdentity::default());
/// let mut session = CheckoutSession::new();
///
/// engine.add_line(&mut session, "Gauze", 3).await?;
/// let receipt = engine.checkout(&mut session, "").await?;
/// println!("{} total {}", receipt.filename, receipt.total);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionEngine<W: Worksheet> {
    catalog: CatalogRepository<W>,
    ledger: LedgerRepository<W>,
    company: CompanyIdentity,
}

impl<W: Worksheet> TransactionEngine<W> {
    pub fn new(
        catalog: CatalogRepository<W>,
        ledger: LedgerRepository<W>,
        company: CompanyIdentity,
    ) -> Self {
        TransactionEngine {
            catalog,
            ledger,
            company,
        }
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one line to the session's cart, freezing the current price.
    ///
    /// ## Errors
    /// * `ItemNotFound` - no inventory row matches the (trimmed) name
    /// * `InsufficientStock` - advisory check against a fresh snapshot;
    ///   the stock is NOT reserved
    /// * `InvalidSessionState` - session already committed or mid-commit
    pub async fn add_line(
        &self,
        session: &mut CheckoutSession,
        name: &str,
        qty: i64,
    ) -> EngineResult<()> {
        let name = validation::validate_item_name(name)?;
        validation::validate_quantity(qty)?;
        session.ensure_can_modify()?;

        let item = self
            .catalog
            .get_item(&name)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(name.clone()))?;

        if item.stock_qty < qty {
            return Err(CoreError::InsufficientStock {
                name: item.name,
                available: item.stock_qty,
                requested: qty,
            }
            .into());
        }

        debug!(session = %session.id(), item = %item.name, qty, "Adding cart line");
        session.cart.push(CartLine::from_item(&item, qty));
        session.state = SessionState::Building;
        Ok(())
    }

    /// Discards the cart and resets the session to empty.
    ///
    /// Allowed from `Failed` too - abandoning a failed sale is a valid
    /// operator choice even though the ledger may need reconciliation.
    pub fn clear_cart(&self, session: &mut CheckoutSession) -> EngineResult<()> {
        session.ensure_can_modify()?;

        debug!(session = %session.id(), lines = session.cart.len(), "Clearing cart");
        session.cart.clear();
        session.state = SessionState::Empty;
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Commits the session's cart as one invoice and renders the document.
    ///
    /// Blank `customer_name` records the walk-in placeholder. On success
    /// the session is `Committed` (terminal) and the cart is cleared; on
    /// failure the session is `Failed` with the cart intact, and checkout
    /// may be retried.
    pub async fn checkout(
        &self,
        session: &mut CheckoutSession,
        customer_name: &str,
    ) -> EngineResult<CheckoutReceipt> {
        session.ensure_can_modify()?;
        if session.cart.is_empty() {
            // Not a state transition: an empty cart is refused up front
            // and the session stays where it was
            return Err(CoreError::Validation(
                medsurg_core::ValidationError::EmptyCart,
            )
            .into());
        }

        let customer = validation::normalize_customer_name(customer_name);
        session.state = SessionState::Committing;

        match self.commit_cart(session, &customer).await {
            Ok(receipt) => {
                info!(
                    session = %session.id(),
                    invoice_id = receipt.invoice_id,
                    total = %receipt.total,
                    "Checkout committed"
                );
                session.cart.clear();
                session.state = SessionState::Committed;
                Ok(receipt)
            }
            Err(err) => {
                if let EngineError::PartialCommit {
                    invoice_id,
                    operation,
                    ..
                } = &err
                {
                    warn!(
                        session = %session.id(),
                        invoice_id,
                        step = %operation,
                        "Checkout partially committed; ledger needs reconciliation"
                    );
                }
                session.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    /// The commit sequence proper. Callers own the state transitions.
    async fn commit_cart(
        &self,
        session: &CheckoutSession,
        customer: &str,
    ) -> EngineResult<CheckoutReceipt> {
        let invoice_id = self.ledger.next_invoice_id().await?;

        let invoice = Invoice {
            invoice_id,
            customer_name: customer.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            total_pesewas: session.cart.total_pesewas(),
        };

        // Everything up to and including this append fails plain: no row
        // was written, the operator just retries
        self.ledger.append_invoice(&invoice).await?;

        // Point of no return. The header row exists; from here every
        // failure names the step so the ledger can be reconciled
        let partial = |operation: CommitStep| {
            move |source: StoreError| EngineError::PartialCommit {
                invoice_id,
                operation,
                source,
            }
        };

        for line in session.cart.lines() {
            let item = self
                .catalog
                .get_item(&line.item_name)
                .await
                .map_err(partial(CommitStep::StockRead))?
                .ok_or_else(|| {
                    partial(CommitStep::StockRead)(StoreError::not_found(
                        "InventoryItem",
                        &line.item_name,
                    ))
                })?;

            self.catalog
                .set_stock(&line.item_name, item.stock_qty - line.qty)
                .await
                .map_err(partial(CommitStep::StockWrite))?;

            self.ledger
                .append_line_item(&InvoiceLineItem {
                    invoice_id,
                    item_name: line.item_name.clone(),
                    qty: line.qty,
                    subtotal_pesewas: line.subtotal_pesewas(),
                })
                .await
                .map_err(partial(CommitStep::LineItemAppend))?;
        }

        // The sale is durable from here; a render failure loses only the
        // paperwork, and the document can be rebuilt from the ledger
        let pdf = render_invoice(&self.company, &invoice, session.cart.lines())?;

        Ok(CheckoutReceipt {
            invoice_id,
            total: invoice.total(),
            filename: invoice_filename(invoice_id),
            pdf,
        })
    }

    // =========================================================================
    // Catalog Maintenance
    // =========================================================================

    /// Creates or restocks an item: quantity ADDS to existing stock, price
    /// REPLACES the current price.
    pub async fn restock(
        &self,
        name: &str,
        qty: i64,
        unit_price: Money,
    ) -> EngineResult<InventoryItem> {
        let name = validation::validate_item_name(name)?;
        validation::validate_quantity(qty)?;
        validation::validate_price(unit_price)?;

        info!(item = %name, qty, price = %unit_price, "Restocking item");
        Ok(self.catalog.upsert_item(&name, qty, unit_price).await?)
    }

    /// Removes an item from the catalog entirely. Committed invoices that
    /// reference the name are untouched.
    pub async fn remove_item(&self, name: &str) -> EngineResult<()> {
        let name = validation::validate_item_name(name)?;

        info!(item = %name, "Removing item");
        Ok(self.catalog.delete_item(&name).await?)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Inventory snapshot, in sheet order.
    pub async fn inventory(&self) -> EngineResult<Vec<InventoryItem>> {
        Ok(self.catalog.list_items().await?)
    }

    /// All committed invoice headers, for the records view.
    pub async fn invoices(&self) -> EngineResult<Vec<Invoice>> {
        Ok(self.ledger.list_invoices().await?)
    }
}
