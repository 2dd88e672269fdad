//! # Layout Primitives
//!
//! A small cell-based composition layer over lopdf content streams.
//!
//! ## The Cell Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The page is composed left-to-right, top-to-bottom from CELLS:          │
//! │                                                                         │
//! │  cell(90, 10, "Description", ...)  cell(30, 10, "Qty", ...)  ...        │
//! │  ┌──────────────────────────────┐┌─────────┐                            │
//! │  │ Description                  ││   Qty   │   ── cursor moves right ─► │
//! │  └──────────────────────────────┘└─────────┘                            │
//! │                                                                         │
//! │  A cell with `ln = true` drops the cursor to the next line instead.     │
//! │  When the cursor would pass the bottom margin, a fresh page starts.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coordinates are millimetres from the top-left of an A4 page (the
//! natural unit for a paper layout); conversion to PDF points from the
//! bottom-left happens only when operations are emitted.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::render::RenderError;
use crate::text::sanitize;

// =============================================================================
// Page Geometry
// =============================================================================

/// Points per millimetre.
const K: f32 = 72.0 / 25.4;

/// A4 page width in mm.
pub const PAGE_WIDTH: f32 = 210.0;

/// A4 page height in mm.
pub const PAGE_HEIGHT: f32 = 297.0;

/// Left/right/top margin in mm.
pub const MARGIN: f32 = 10.0;

/// Usable width between the margins.
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Vertical position past which a new page starts (20mm bottom margin).
const PAGE_BREAK_AT: f32 = PAGE_HEIGHT - 20.0;

/// Horizontal padding inside a cell before left-aligned / after
/// right-aligned text.
const CELL_PAD: f32 = 1.0;

// =============================================================================
// Fonts
// =============================================================================

/// The three faces the invoice uses, mapped to base-14 PDF fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    /// Resource name inside the page font dictionary.
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
        }
    }
}

/// Coarse per-glyph advance widths for Helvetica, in em fractions.
///
/// Good enough to center a title or right-align a money column in a
/// fixed table; exact metrics would need an AFM table for no visible
/// benefit at these sizes.
fn glyph_width(byte: u8) -> f32 {
    match byte {
        b'i' | b'j' | b'l' | b'I' | b'.' | b',' | b':' | b';' | b'!' | b'\'' | b'|' => 0.28,
        b' ' | b'(' | b')' | b'[' | b']' | b'-' => 0.33,
        b'm' | b'w' | b'M' | b'W' | b'@' => 0.85,
        b'A'..=b'Z' | b'0'..=b'9' => 0.60,
        _ => 0.50,
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal text alignment within a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

// =============================================================================
// Page Composer
// =============================================================================

/// Accumulates content-stream operations page by page, then assembles the
/// final PDF document.
#[derive(Debug)]
pub struct PageComposer {
    /// Finished pages.
    done: Vec<Vec<Operation>>,
    /// Operations for the page under construction.
    current: Vec<Operation>,
    /// Cursor, mm from top-left.
    x: f32,
    y: f32,
    font: Font,
    /// Font size in points.
    size: f32,
    /// Gray level used when a cell is filled (0 = black, 1 = white).
    fill_gray: f32,
}

impl PageComposer {
    /// Starts a document with one empty page, cursor at the top margin.
    pub fn new() -> Self {
        PageComposer {
            done: Vec::new(),
            current: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            font: Font::Regular,
            size: 10.0,
            fill_gray: 0.94,
        }
    }

    /// Current vertical cursor position in mm.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Number of pages, counting the one under construction.
    pub fn page_count(&self) -> usize {
        self.done.len() + 1
    }

    /// Selects the font face and size (points) for subsequent cells.
    pub fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.size = size;
    }

    /// Sets the fill gray level for shaded cells.
    pub fn set_fill_gray(&mut self, gray: f32) {
        self.fill_gray = gray;
    }

    /// Draws one cell: optional shading, optional border, and text
    /// vertically centered within the cell height.
    ///
    /// ## Arguments
    /// * `w`, `h` - cell size in mm
    /// * `align`  - horizontal placement of the text inside the cell
    /// * `ln`     - `true` drops the cursor to the start of the next
    ///              line; `false` continues to the right
    ///
    /// Text goes through the lossy sanitize step here - this is the
    /// single choke point of the never-fail text policy.
    pub fn cell(&mut self, w: f32, h: f32, text: &str, border: bool, align: Align, fill: bool, ln: bool) {
        if self.y + h > PAGE_BREAK_AT {
            self.start_page();
        }

        if fill {
            self.push("q", vec![]);
            self.push("g", vec![Object::Real(self.fill_gray)]);
            self.rect(self.x, self.y, w, h);
            self.push("f", vec![]);
            self.push("Q", vec![]);
        }

        if border {
            self.rect(self.x, self.y, w, h);
            self.push("S", vec![]);
        }

        let bytes = sanitize(text);
        if !bytes.is_empty() {
            let text_w = self.text_width(&bytes);
            let tx = match align {
                Align::Left => self.x + CELL_PAD,
                Align::Center => self.x + (w - text_w) / 2.0,
                Align::Right => self.x + w - text_w - CELL_PAD,
            };
            // Baseline sits a little under the vertical center, same
            // rule a print layout uses for single-line cells
            let baseline = self.y + h / 2.0 + 0.3 * (self.size / K);

            self.push("BT", vec![]);
            self.push(
                "Tf",
                vec![self.font.resource().into(), Object::Real(self.size)],
            );
            self.push(
                "Td",
                vec![
                    Object::Real(tx * K),
                    Object::Real((PAGE_HEIGHT - baseline) * K),
                ],
            );
            self.push("Tj", vec![Object::string_literal(bytes)]);
            self.push("ET", vec![]);
        }

        if ln {
            self.x = MARGIN;
            self.y += h;
        } else {
            self.x += w;
        }
    }

    /// Drops the cursor `h` mm down and back to the left margin.
    pub fn line_break(&mut self, h: f32) {
        self.x = MARGIN;
        self.y += h;
        if self.y > PAGE_BREAK_AT {
            self.start_page();
        }
    }

    /// Draws a horizontal rule across the given span at the current
    /// cursor height.
    pub fn rule(&mut self, from_x: f32, to_x: f32, width_mm: f32) {
        self.push("w", vec![Object::Real(width_mm * K)]);
        self.push(
            "m",
            vec![
                Object::Real(from_x * K),
                Object::Real((PAGE_HEIGHT - self.y) * K),
            ],
        );
        self.push(
            "l",
            vec![
                Object::Real(to_x * K),
                Object::Real((PAGE_HEIGHT - self.y) * K),
            ],
        );
        self.push("S", vec![]);
    }

    /// Assembles the pages into a PDF and returns the bytes.
    ///
    /// Content streams stay uncompressed: the documents are tiny and the
    /// plain streams keep them greppable in tests and debugging.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        self.done.push(std::mem::take(&mut self.current));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let italic = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Oblique",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
                "F3" => italic,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.done {
            let content = Content { operations };
            let stream = Stream::new(dictionary! {}, content.encode()?);
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(PAGE_WIDTH * K),
                Object::Real(PAGE_HEIGHT * K),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.current.push(Operation::new(operator, operands));
    }

    /// Emits a rectangle path in PDF coordinates (origin bottom-left).
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push(
            "re",
            vec![
                Object::Real(x * K),
                Object::Real((PAGE_HEIGHT - y - h) * K),
                Object::Real(w * K),
                Object::Real(h * K),
            ],
        );
    }

    /// Approximate rendered width of sanitized text, in mm.
    fn text_width(&self, bytes: &[u8]) -> f32 {
        let ems: f32 = bytes.iter().map(|&b| glyph_width(b)).sum();
        ems * self.size / K
    }

    fn start_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.x = MARGIN;
        self.y = MARGIN;
    }
}

impl Default for PageComposer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_flow() {
        let mut page = PageComposer::new();
        assert_eq!(page.y(), MARGIN);

        page.cell(100.0, 8.0, "left", false, Align::Left, false, false);
        page.cell(90.0, 8.0, "right", false, Align::Right, false, true);
        assert_eq!(page.y(), MARGIN + 8.0);

        page.line_break(5.0);
        assert_eq!(page.y(), MARGIN + 13.0);
    }

    #[test]
    fn test_page_break_on_overflow() {
        let mut page = PageComposer::new();
        assert_eq!(page.page_count(), 1);

        // 40 rows of 10mm blow well past one A4 page
        for i in 0..40 {
            page.cell(100.0, 10.0, &format!("row {}", i), true, Align::Left, false, true);
        }
        assert!(page.page_count() >= 2);
    }

    #[test]
    fn test_finish_produces_pdf_bytes() {
        let mut page = PageComposer::new();
        page.cell(100.0, 10.0, "hello", false, Align::Left, false, true);

        let bytes = page.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("(hello)"));
        assert!(raw.contains("Helvetica"));
    }

    #[test]
    fn test_multi_page_document_structure() {
        let mut page = PageComposer::new();
        for i in 0..60 {
            page.cell(100.0, 10.0, &format!("row {}", i), false, Align::Left, false, true);
        }
        let pages = page.page_count();

        let bytes = page.finish().unwrap();
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains(&format!("/Count {}", pages)));
    }
}
