//! # printcost-core: Pure Pricing Logic for PrintCost
//!
//! Cost engine, input parsing and the quote model for 3D-printed parts.
//! Nothing in this crate touches the filesystem or a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PrintCost Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    printcost (CLI)                              │   │
//! │  │    calc ──► list ──► remove / set-quantity ──► export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ printcost-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   parse   │  │  engine   │  │   quote   │  │ validation│  │   │
//! │  │   │  "2,30"   │  │ calculate │  │ QuoteItem │  │   rules   │  │   │
//! │  │   │  → 2.5h   │  │ breakdown │  │   Quote   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                  │                                  │                   │
//! │  ┌───────────────▼──────────────┐  ┌───────────────▼────────────────┐  │
//! │  │ printcost-db (quote store)   │  │ printcost-report (PDF / text)  │  │
//! │  └──────────────────────────────┘  └────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`parse`] - Lenient number and duration parsing
//! - [`types`] - Parameters, cost models, breakdowns
//! - [`engine`] - The cost calculation
//! - [`quote`] - Quote items and the quote list
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use printcost_core::engine::calculate;
//! use printcost_core::quote::{ItemDetails, Painting, Quote, QuoteItem};
//! use printcost_core::types::ParameterSet;
//!
//! let params = ParameterSet {
//!     filament_price: 100.0,
//!     weight_g: 50.0,
//!     ..ParameterSet::default()
//! };
//! let breakdown = calculate(&params).unwrap();
//!
//! let details = ItemDetails::new("Vaso", "PLA", 2, Painting::Nao).unwrap();
//! let mut quote = Quote::new();
//! quote.push(QuoteItem::new(details, &params, breakdown));
//!
//! assert_eq!(quote.total(), 10.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod parse;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::calculate;
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use parse::DurationFormat;
pub use quote::{ItemDetails, Painting, Quote, QuoteItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name given to items entered without one.
pub const UNNAMED_ITEM: &str = "Item sem nome";

/// Material assumed when none is entered.
pub const DEFAULT_MATERIAL: &str = "PLA";

/// Currency symbol used in every user-facing amount.
pub const CURRENCY_SYMBOL: &str = "R$";

pub const MAX_ITEM_NAME_LEN: usize = 120;

pub const MAX_MATERIAL_LEN: usize = 40;

pub const MAX_CLIENT_NAME_LEN: usize = 120;

/// Formats an amount as `R$ 12.34`.
///
/// ## Example
/// ```rust
/// assert_eq!(printcost_core::format_currency(859.534), "R$ 859.53");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("{} {:.2}", CURRENCY_SYMBOL, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0.00");
        assert_eq!(format_currency(429.767), "R$ 429.77");
        assert_eq!(format_currency(1234.5), "R$ 1234.50");
    }
}
