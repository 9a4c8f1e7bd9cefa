//! Command implementations for the CLI
//!
//! - calc: price one part, optionally adding it to the quote
//! - quote: list, remove, set-quantity and clear the quote
//! - export: write the quote as a PDF or text document
//! - config: show the effective configuration

pub mod calc;
pub mod config;
pub mod export;
pub mod quote;
