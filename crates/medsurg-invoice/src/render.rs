//! # Invoice Rendering
//!
//! The fixed invoice layout, composed from [`layout`](crate::layout)
//! cells. One function, one document shape - this is deliberately not a
//! templating system.

use thiserror::Error;
use tracing::debug;

use crate::layout::{Align, Font, PageComposer, CONTENT_WIDTH, MARGIN, PAGE_WIDTH};
use medsurg_core::{CartLine, Invoice, CURRENCY_CODE};

// =============================================================================
// Company Identity
// =============================================================================

/// Static identity block printed at the top of every invoice.
#[derive(Debug, Clone)]
pub struct CompanyIdentity {
    pub name: String,
    /// May contain newlines; each line renders centered.
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Closing message under the totals.
    pub closing_message: String,
}

impl Default for CompanyIdentity {
    fn default() -> Self {
        CompanyIdentity {
            name: "MEDSURG TECHNOLOGY".to_string(),
            address: "Post Office Box 793, Madina\nAccra, Ghana".to_string(),
            phone: "+233 20 479 3691 / +233 24 200 1242".to_string(),
            email: "medsurgtechnology@gmail.com".to_string(),
            closing_message: "Thank you for your business!".to_string(),
        }
    }
}

// =============================================================================
// Render Error
// =============================================================================

/// Document assembly failures.
///
/// Text content can never cause one of these - odd characters are lossily
/// substituted long before assembly. What remains is structural (PDF
/// object encoding), which does not depend on input data.
#[derive(Debug, Error)]
pub enum RenderError {
    /// PDF object model error while assembling the document.
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Write into the output buffer failed.
    #[error("Document write failed: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Table Geometry
// =============================================================================

// Column widths in mm; together they span the 190mm content width
const COL_DESCRIPTION: f32 = 90.0;
const COL_QTY: f32 = 30.0;
const COL_UNIT_PRICE: f32 = 35.0;
const COL_TOTAL: f32 = 35.0;

// =============================================================================
// Rendering
// =============================================================================

/// Conventional download filename for a rendered invoice.
pub fn invoice_filename(invoice_id: i64) -> String {
    format!("Invoice_{}.pdf", invoice_id)
}

/// Renders a committed invoice into PDF bytes.
///
/// ## Arguments
/// * `company` - static identity block for the header
/// * `invoice` - the committed header (id, customer, timestamp, total)
/// * `lines`   - the cart lines behind the invoice, in the order they
///               were added; each carries the frozen unit price the
///               table's Unit Price column needs
///
/// The grand total is taken from `invoice`, not recomputed - the document
/// must show exactly what was committed to the ledger.
pub fn render_invoice(
    company: &CompanyIdentity,
    invoice: &Invoice,
    lines: &[CartLine],
) -> Result<Vec<u8>, RenderError> {
    debug!(invoice_id = %invoice.invoice_id, lines = lines.len(), "Rendering invoice");

    let mut page = PageComposer::new();

    // Company header, centered
    page.set_font(Font::Bold, 20.0);
    page.cell(CONTENT_WIDTH, 10.0, &company.name, false, Align::Center, false, true);

    page.set_font(Font::Regular, 10.0);
    for address_line in company.address.lines() {
        page.cell(CONTENT_WIDTH, 5.0, address_line, false, Align::Center, false, true);
    }
    page.cell(
        CONTENT_WIDTH,
        5.0,
        &format!("Tel: {}", company.phone),
        false,
        Align::Center,
        false,
        true,
    );
    page.cell(
        CONTENT_WIDTH,
        5.0,
        &format!("Email: {}", company.email),
        false,
        Align::Center,
        false,
        true,
    );
    page.line_break(10.0);

    page.rule(MARGIN, PAGE_WIDTH - MARGIN, 0.5);
    page.line_break(5.0);

    page.set_font(Font::Bold, 12.0);
    page.cell(CONTENT_WIDTH, 10.0, "OFFICIAL INVOICE", false, Align::Center, false, true);

    // Metadata block: customer left, invoice number and date right
    page.set_font(Font::Regular, 11.0);
    page.cell(
        100.0,
        8.0,
        &format!("Customer: {}", invoice.customer_name),
        false,
        Align::Left,
        false,
        false,
    );
    page.cell(
        90.0,
        8.0,
        &format!("Invoice #: {}", invoice.invoice_id),
        false,
        Align::Right,
        false,
        true,
    );
    page.cell(100.0, 8.0, "", false, Align::Left, false, false);
    page.cell(
        90.0,
        8.0,
        &format!("Date: {}", invoice.timestamp),
        false,
        Align::Right,
        false,
        true,
    );
    page.line_break(5.0);

    // Table header, shaded
    page.set_fill_gray(0.94);
    page.set_font(Font::Bold, 11.0);
    page.cell(COL_DESCRIPTION, 10.0, "Description", true, Align::Left, true, false);
    page.cell(COL_QTY, 10.0, "Qty", true, Align::Center, true, false);
    page.cell(COL_UNIT_PRICE, 10.0, "Unit Price", true, Align::Right, true, false);
    page.cell(COL_TOTAL, 10.0, "Total", true, Align::Right, true, true);

    // One row per cart line, insertion order
    page.set_font(Font::Regular, 11.0);
    for line in lines {
        page.cell(COL_DESCRIPTION, 10.0, &line.item_name, true, Align::Left, false, false);
        page.cell(COL_QTY, 10.0, &line.qty.to_string(), true, Align::Center, false, false);
        page.cell(
            COL_UNIT_PRICE,
            10.0,
            &line.unit_price().to_decimal_string(),
            true,
            Align::Right,
            false,
            false,
        );
        page.cell(
            COL_TOTAL,
            10.0,
            &line.subtotal().to_decimal_string(),
            true,
            Align::Right,
            false,
            true,
        );
    }

    page.line_break(5.0);
    page.set_font(Font::Bold, 12.0);
    page.cell(
        COL_DESCRIPTION + COL_QTY + COL_UNIT_PRICE,
        10.0,
        &format!("GRAND TOTAL ({}):", CURRENCY_CODE),
        false,
        Align::Right,
        false,
        false,
    );
    page.cell(COL_TOTAL, 10.0, &invoice.total().grouped(), false, Align::Right, false, true);

    page.line_break(20.0);
    page.set_font(Font::Italic, 10.0);
    page.cell(CONTENT_WIDTH, 10.0, &company.closing_message, false, Align::Center, false, true);

    page.finish()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use medsurg_core::InventoryItem;

    fn line(name: &str, qty: i64, price_pesewas: i64) -> CartLine {
        CartLine::from_item(
            &InventoryItem {
                name: name.to_string(),
                stock_qty: 100,
                unit_price_pesewas: price_pesewas,
            },
            qty,
        )
    }

    fn invoice(total_pesewas: i64) -> Invoice {
        Invoice {
            invoice_id: 1001,
            customer_name: "Walk-in".to_string(),
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_pesewas,
        }
    }

    #[test]
    fn test_rendered_document_contains_required_blocks() {
        let lines = vec![line("Gauze", 3, 500)];
        let bytes = render_invoice(&CompanyIdentity::default(), &invoice(1500), &lines).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let raw = String::from_utf8_lossy(&bytes);

        assert!(raw.contains("MEDSURG TECHNOLOGY"));
        assert!(raw.contains("OFFICIAL INVOICE"));
        assert!(raw.contains("Customer: Walk-in"));
        assert!(raw.contains("Invoice #: 1001"));
        assert!(raw.contains("GRAND TOTAL"));
        assert!(raw.contains("Thank you for your business!"));
    }

    #[test]
    fn test_grand_total_matches_invoice_to_two_decimals() {
        let lines = vec![line("Gauze", 3, 500)];
        let bytes = render_invoice(&CompanyIdentity::default(), &invoice(1500), &lines).unwrap();

        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("(15.00)"));
    }

    #[test]
    fn test_table_rows_keep_insertion_order() {
        let lines = vec![line("Gauze", 3, 500), line("Syringe", 2, 125)];
        let bytes = render_invoice(&CompanyIdentity::default(), &invoice(1750), &lines).unwrap();

        let raw = String::from_utf8_lossy(&bytes).to_string();
        let gauze_at = raw.find("(Gauze)").expect("Gauze row missing");
        let syringe_at = raw.find("(Syringe)").expect("Syringe row missing");
        assert!(gauze_at < syringe_at);
    }

    #[test]
    fn test_exotic_text_never_fails() {
        let mut odd = invoice(1500);
        odd.customer_name = "Kwame \u{1F600} \u{2764} Osei".to_string();
        let lines = vec![line("Gauze \u{2603}", 3, 500)];

        let bytes = render_invoice(&CompanyIdentity::default(), &odd, &lines).unwrap();
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("Customer: Kwame ? ? Osei"));
        assert!(raw.contains("(Gauze ?)"));
    }

    #[test]
    fn test_long_invoice_spills_to_second_page() {
        let lines: Vec<CartLine> = (0..40).map(|i| line(&format!("Item {}", i), 1, 100)).collect();
        let bytes = render_invoice(&CompanyIdentity::default(), &invoice(4000), &lines).unwrap();

        let raw = String::from_utf8_lossy(&bytes);
        // Page tree count, written without spaces in the dictionary
        assert!(raw.contains("/Count 2"));
    }

    #[test]
    fn test_invoice_filename() {
        assert_eq!(invoice_filename(1001), "Invoice_1001.pdf");
    }
}
