//! Report error types.

use std::path::PathBuf;

use printcost_core::ValidationError;
use thiserror::Error;

/// Errors raised while building or rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// There is nothing to put on the document.
    #[error("Quote is empty; add items before exporting")]
    EmptyQuote,

    /// The configured font family could not be loaded.
    ///
    /// ## When This Occurs
    /// - `fonts_dir` does not exist
    /// - One of `<family>-Regular.ttf`, `-Bold`, `-Italic`, `-BoldItalic` is missing
    #[error("Font family '{family}' not found in {}: {reason}", dir.display())]
    FontNotFound {
        dir: PathBuf,
        family: String,
        reason: String,
    },

    /// The renderer failed.
    #[error("Render failed: {0}")]
    Render(String),

    /// Report metadata was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

impl From<genpdf::error::Error> for ReportError {
    fn from(err: genpdf::error::Error) -> Self {
        ReportError::Render(err.to_string())
    }
}
