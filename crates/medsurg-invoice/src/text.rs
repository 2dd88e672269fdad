//! # Text Sanitization
//!
//! The lossy encode step behind the renderer's never-fail text policy.
//!
//! The document uses the base PDF fonts with a single-byte Latin encoding,
//! so any character above U+00FF simply has no glyph. Rather than rejecting
//! such input (and losing a sale document over an emoji in a customer
//! name), every text field is lossily encoded: representable characters
//! pass through, everything else becomes a replacement glyph.
//!
//! This is a deliberate, documented policy - not something to "fix" with
//! validation upstream. The invoice already committed by the time we
//! render; the document must come out.

/// Replacement glyph for characters outside the Latin-1 range.
pub const REPLACEMENT: u8 = b'?';

/// Lossily encodes text to Latin-1 bytes.
///
/// ## Example
/// ```rust
/// use medsurg_invoice::text::sanitize;
///
/// assert_eq!(sanitize("Gauze"), b"Gauze");
/// assert_eq!(sanitize("Kofi \u{2764} Ama"), b"Kofi ? Ama");
/// ```
pub fn sanitize(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
