//! # medsurg-invoice: Invoice Document Renderer
//!
//! Turns a committed invoice plus its cart lines into printable PDF bytes.
//!
//! ## Document Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     MEDSURG TECHNOLOGY                      │  bold 20, centered
//! │               Post Office Box 793, Madina                   │  regular 10
//! │                      Accra, Ghana                           │
//! │            Tel: ...            Email: ...                   │
//! │  ───────────────────────────────────────────────────────── │  rule
//! │                     OFFICIAL INVOICE                        │  bold 12
//! │  Customer: Walk-in                       Invoice #: 1001    │
//! │                                Date: 2024-06-01 10:30:00    │
//! │  ┌──────────────┬─────┬────────────┬────────┐               │
//! │  │ Description  │ Qty │ Unit Price │ Total  │               │  shaded header
//! │  ├──────────────┼─────┼────────────┼────────┤               │
//! │  │ Gauze        │  3  │       5.00 │  15.00 │               │  one row per line
//! │  └──────────────┴─────┴────────────┴────────┘               │
//! │                        GRAND TOTAL (GHS):          15.00    │  bold, right
//! │                                                             │
//! │                 Thank you for your business!                │  italic 10
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`render`] - The invoice layout itself
//! - [`layout`] - Cell/rule/page primitives over lopdf content streams
//! - [`text`] - Lossy Latin-1 sanitization (the never-fail text policy)

pub mod layout;
pub mod render;
pub mod text;

pub use render::{invoice_filename, render_invoice, CompanyIdentity, RenderError};
