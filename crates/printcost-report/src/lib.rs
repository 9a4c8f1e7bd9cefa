//! # printcost-report: Client Quote Documents
//!
//! Builds a [`QuoteReport`] from the quote and renders it.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[QuoteItem] + client + date                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteReport::build() ── empty? ──► ReportError::EmptyQuote            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportExporter::render()                                              │
//! │       ├──► PdfExporter  (genpdf)      ──► bytes ──► orcamento_X.pdf    │
//! │       └──► TextExporter (comfy-table) ──► bytes ──► orcamento_X.txt    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod pdf;
pub mod report;
pub mod text;

pub use error::{ReportError, ReportResult};
pub use pdf::PdfExporter;
pub use report::{default_file_name, QuoteReport, ReportLine, ReportSettings, DEFAULT_CLIENT};
pub use text::TextExporter;

/// A document format for quotes.
pub trait ReportExporter {
    /// Renders the whole document into memory.
    fn render(&self, report: &QuoteReport) -> ReportResult<Vec<u8>>;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;
}
