//! End-to-end checkout tests over the in-memory worksheet.
//!
//! These drive the whole stack: engine -> repositories -> worksheet rows,
//! plus the rendered document bytes. A small failure-injecting worksheet
//! wrapper exercises the partial-commit classification.

use async_trait::async_trait;

use medsurg_core::{CoreError, Money, ValidationError};
use medsurg_engine::{
    CheckoutSession, CommitStep, EngineError, SessionState, TransactionEngine,
};
use medsurg_invoice::CompanyIdentity;
use medsurg_store::{
    CatalogRepository, LedgerRepository, MemoryWorksheet, StoreError, StoreResult, Worksheet,
};

// =============================================================================
// Failure-Injecting Worksheet
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailOn {
    Nothing,
    AppendRow,
    UpdateCell,
}

/// Delegates to a MemoryWorksheet, failing one configured write method.
#[derive(Debug, Clone)]
struct FlakyWorksheet {
    inner: MemoryWorksheet,
    fail_on: FailOn,
}

impl FlakyWorksheet {
    fn reliable(name: &str) -> Self {
        FlakyWorksheet {
            inner: MemoryWorksheet::new(name),
            fail_on: FailOn::Nothing,
        }
    }

    fn with_rows(name: &str, rows: Vec<Vec<String>>) -> Self {
        FlakyWorksheet {
            inner: MemoryWorksheet::with_rows(name, rows),
            fail_on: FailOn::Nothing,
        }
    }

    fn failing_on(mut self, fail_on: FailOn) -> Self {
        self.fail_on = fail_on;
        self
    }
}

#[async_trait]
impl Worksheet for FlakyWorksheet {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn rows(&self) -> StoreResult<Vec<Vec<String>>> {
        self.inner.rows().await
    }

    async fn append_row(&self, row: Vec<String>) -> StoreResult<()> {
        if self.fail_on == FailOn::AppendRow {
            return Err(StoreError::connection("simulated outage"));
        }
        self.inner.append_row(row).await
    }

    async fn update_cell(&self, row: usize, col: usize, value: String) -> StoreResult<()> {
        if self.fail_on == FailOn::UpdateCell {
            return Err(StoreError::connection("simulated outage"));
        }
        self.inner.update_cell(row, col, value).await
    }

    async fn delete_row(&self, row: usize) -> StoreResult<()> {
        self.inner.delete_row(row).await
    }
}

// =============================================================================
// Fixture
// =============================================================================

struct Fixture {
    engine: TransactionEngine<FlakyWorksheet>,
    inventory: FlakyWorksheet,
    invoices: FlakyWorksheet,
    items: FlakyWorksheet,
}

fn fixture_with(inventory: FlakyWorksheet) -> Fixture {
    // Visible with --nocapture; repeated init attempts are fine
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let invoices = FlakyWorksheet::reliable("Invoices");
    let items = FlakyWorksheet::reliable("Invoice_Items");

    Fixture {
        engine: TransactionEngine::new(
            CatalogRepository::new(inventory.clone()),
            LedgerRepository::new(invoices.clone(), items.clone()),
            CompanyIdentity::default(),
        ),
        inventory,
        invoices,
        items,
    }
}

fn seeded_fixture() -> Fixture {
    fixture_with(FlakyWorksheet::with_rows(
        "Inventory",
        vec![
            vec!["Gauze".to_string(), "10".to_string(), "5.00".to_string()],
            vec!["Syringe".to_string(), "2".to_string(), "1.25".to_string()],
        ],
    ))
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_checkout_commits_ledger_stock_and_document() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    fx.engine.add_line(&mut session, "Gauze", 3).await.unwrap();
    assert_eq!(session.state(), SessionState::Building);

    let receipt = fx.engine.checkout(&mut session, "").await.unwrap();

    assert_eq!(receipt.invoice_id, 1001);
    assert_eq!(receipt.total, Money::from_pesewas(1500));
    assert_eq!(receipt.filename, "Invoice_1001.pdf");
    assert!(receipt.pdf.starts_with(b"%PDF"));

    // Session is terminal, cart discarded
    assert_eq!(session.state(), SessionState::Committed);
    assert!(session.cart().is_empty());

    // Stock decremented 10 -> 7
    let gauze = fx.engine.inventory().await.unwrap();
    assert_eq!(gauze[0].stock_qty, 7);

    // Header row: blank customer recorded as Walk-in
    let header = &fx.invoices.rows().await.unwrap()[0];
    assert_eq!(header[0], "1001");
    assert_eq!(header[1], "Walk-in");
    assert_eq!(header[3], "15.00");

    // One line-item row
    assert_eq!(
        fx.items.rows().await.unwrap(),
        vec![vec!["1001", "Gauze", "3", "15.00"]]
    );
}

#[tokio::test]
async fn test_document_shows_committed_names_and_amounts() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    fx.engine.add_line(&mut session, "Gauze", 2).await.unwrap();
    fx.engine.add_line(&mut session, "Syringe", 1).await.unwrap();

    let receipt = fx.engine.checkout(&mut session, "Ama Mensah").await.unwrap();
    let raw = String::from_utf8_lossy(&receipt.pdf).to_string();

    assert!(raw.contains("Customer: Ama Mensah"));
    assert!(raw.contains("(Gauze)"));
    assert!(raw.contains("(Syringe)"));
    assert!(raw.contains("GRAND TOTAL"));

    let gauze_at = raw.find("(Gauze)").unwrap();
    let syringe_at = raw.find("(Syringe)").unwrap();
    assert!(gauze_at < syringe_at, "rows must keep insertion order");
}

#[tokio::test]
async fn test_consecutive_checkouts_get_consecutive_ids() {
    let fx = seeded_fixture();

    let mut first = CheckoutSession::new();
    fx.engine.add_line(&mut first, "Gauze", 1).await.unwrap();
    assert_eq!(fx.engine.checkout(&mut first, "").await.unwrap().invoice_id, 1001);

    let mut second = CheckoutSession::new();
    fx.engine.add_line(&mut second, "Gauze", 1).await.unwrap();
    assert_eq!(fx.engine.checkout(&mut second, "").await.unwrap().invoice_id, 1002);
}

// =============================================================================
// Refusals Before Any Write
// =============================================================================

#[tokio::test]
async fn test_empty_cart_checkout_is_refused_without_writes() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    let err = fx.engine.checkout(&mut session, "").await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Core(CoreError::Validation(ValidationError::EmptyCart))
    ));

    // Session untouched, ledger untouched
    assert_eq!(session.state(), SessionState::Empty);
    assert!(fx.invoices.rows().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_line_unknown_item() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    let err = fx.engine.add_line(&mut session, "Scalpel", 1).await.unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::ItemNotFound(_))));
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn test_add_line_insufficient_stock_is_advisory_refusal() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    let err = fx.engine.add_line(&mut session, "Syringe", 5).await.unwrap_err();
    match err {
        EngineError::Core(CoreError::InsufficientStock {
            available,
            requested,
            ..
        }) => {
            assert_eq!(available, 2);
            assert_eq!(requested, 5);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Nothing was written anywhere
    assert!(session.cart().is_empty());
    assert_eq!(fx.inventory.rows().await.unwrap()[1][1], "2");
}

#[tokio::test]
async fn test_committed_session_refuses_further_use() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    fx.engine.add_line(&mut session, "Gauze", 1).await.unwrap();
    fx.engine.checkout(&mut session, "").await.unwrap();

    let err = fx.engine.add_line(&mut session, "Gauze", 1).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Core(CoreError::InvalidSessionState { .. })
    ));
    assert!(fx.engine.checkout(&mut session, "").await.is_err());
}

// =============================================================================
// Partial Commits
// =============================================================================

#[tokio::test]
async fn test_header_append_failure_is_plain_and_retryable() {
    // The INVOICES sheet rejects appends: checkout dies before the point
    // of no return and surfaces a plain store error
    let inventory = FlakyWorksheet::with_rows(
        "Inventory",
        vec![vec!["Gauze".to_string(), "10".to_string(), "5.00".to_string()]],
    );
    let invoices = FlakyWorksheet::reliable("Invoices").failing_on(FailOn::AppendRow);
    let items = FlakyWorksheet::reliable("Invoice_Items");

    let engine = TransactionEngine::new(
        CatalogRepository::new(inventory.clone()),
        LedgerRepository::new(invoices.clone(), items.clone()),
        CompanyIdentity::default(),
    );

    let mut session = CheckoutSession::new();
    engine.add_line(&mut session, "Gauze", 3).await.unwrap();

    let err = engine.checkout(&mut session, "").await.unwrap_err();
    assert!(matches!(err, EngineError::Store(_)));

    // Failed but fully consistent: no rows, stock untouched, cart intact
    assert_eq!(session.state(), SessionState::Failed);
    assert!(invoices.rows().await.unwrap().is_empty());
    assert!(items.rows().await.unwrap().is_empty());
    assert_eq!(inventory.rows().await.unwrap()[0][1], "10");
    assert_eq!(session.cart().len(), 1);
}

#[tokio::test]
async fn test_stock_write_failure_classifies_as_partial_commit() {
    // The INVENTORY sheet rejects cell updates: the header row lands,
    // then the stock decrement fails
    let inventory = FlakyWorksheet::with_rows(
        "Inventory",
        vec![vec!["Gauze".to_string(), "10".to_string(), "5.00".to_string()]],
    )
    .failing_on(FailOn::UpdateCell);
    let fx = fixture_with(inventory);

    let mut session = CheckoutSession::new();
    fx.engine.add_line(&mut session, "Gauze", 3).await.unwrap();

    let err = fx.engine.checkout(&mut session, "").await.unwrap_err();
    match err {
        EngineError::PartialCommit {
            invoice_id,
            operation,
            ..
        } => {
            assert_eq!(invoice_id, 1001);
            assert_eq!(operation, CommitStep::StockWrite);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Header row written, nothing after it
    assert_eq!(fx.invoices.rows().await.unwrap().len(), 1);
    assert!(fx.items.rows().await.unwrap().is_empty());
    assert_eq!(fx.inventory.rows().await.unwrap()[0][1], "10");

    // Cart preserved for retry or abandonment
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(session.cart().len(), 1);
}

#[tokio::test]
async fn test_failed_session_can_retry_checkout() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();
    fx.engine.add_line(&mut session, "Gauze", 3).await.unwrap();

    // First attempt goes through an engine whose invoices sheet rejects
    // appends; the retry goes through the healthy one, same session
    let flaky = TransactionEngine::new(
        CatalogRepository::new(fx.inventory.clone()),
        LedgerRepository::new(
            FlakyWorksheet::reliable("Invoices").failing_on(FailOn::AppendRow),
            fx.items.clone(),
        ),
        CompanyIdentity::default(),
    );
    assert!(flaky.checkout(&mut session, "").await.is_err());
    assert_eq!(session.state(), SessionState::Failed);

    // Retry on the healthy engine succeeds with the same cart
    let receipt = fx.engine.checkout(&mut session, "").await.unwrap();
    assert_eq!(receipt.total, Money::from_pesewas(1500));
    assert_eq!(session.state(), SessionState::Committed);
}

// =============================================================================
// Pricing Semantics
// =============================================================================

#[tokio::test]
async fn test_price_frozen_at_add_time_survives_restock() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    fx.engine.add_line(&mut session, "Gauze", 3).await.unwrap();

    // Restock doubles the price AFTER the line was added
    fx.engine
        .restock("Gauze", 5, Money::from_pesewas(1000))
        .await
        .unwrap();

    let receipt = fx.engine.checkout(&mut session, "").await.unwrap();
    assert_eq!(receipt.total, Money::from_pesewas(1500)); // 3 x 5.00, not 3 x 10.00
}

#[tokio::test]
async fn test_same_item_twice_commits_two_line_rows() {
    let fx = seeded_fixture();
    let mut session = CheckoutSession::new();

    fx.engine.add_line(&mut session, "Gauze", 1).await.unwrap();
    fx.engine.add_line(&mut session, "Gauze", 2).await.unwrap();

    fx.engine.checkout(&mut session, "").await.unwrap();

    let rows = fx.items.rows().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "1");
    assert_eq!(rows[1][2], "2");

    // Stock decremented once per line: 10 - 1 - 2
    assert_eq!(fx.inventory.rows().await.unwrap()[0][1], "7");
}

// =============================================================================
// Catalog Maintenance
// =============================================================================

#[tokio::test]
async fn test_restock_and_remove() {
    let fx = seeded_fixture();

    let item = fx
        .engine
        .restock("Bandage", 20, Money::from_pesewas(250))
        .await
        .unwrap();
    assert_eq!(item.stock_qty, 20);

    fx.engine.remove_item("Bandage").await.unwrap();
    let err = fx.engine.remove_item("Bandage").await.unwrap_err();
    assert!(matches!(err, EngineError::Store(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_restock_rejects_bad_input_before_any_write() {
    let fx = seeded_fixture();
    let before = fx.inventory.rows().await.unwrap();

    assert!(fx.engine.restock("  ", 5, Money::from_pesewas(100)).await.is_err());
    assert!(fx.engine.restock("Gauze", 0, Money::from_pesewas(100)).await.is_err());
    assert!(fx.engine.restock("Gauze", 5, Money::from_pesewas(-1)).await.is_err());

    assert_eq!(fx.inventory.rows().await.unwrap(), before);
}
