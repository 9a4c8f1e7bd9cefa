//! # Report Model
//!
//! Everything a quote document shows, already formatted, independent of the
//! output format.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ORÇAMENTO                                                              │
//! │  <business name>                                                        │
//! │  Cliente: <client>                                                      │
//! │  Data: 19/10/2026                                                       │
//! │                                                                         │
//! │  Qtd. │ Descrição │ Material │ Peso │ Tempo │ Pintura │ Valor           │
//! │  ─────┼───────────┼──────────┼──────┼───────┼─────────┼─────────        │
//! │  2    │ Vaso      │ PLA      │50.00g│ 1.5h  │ Não     │ R$ 20.00        │
//! │                                                                         │
//! │  Total: R$ 20.00                                                        │
//! │  Pagamento: <payment terms>                                             │
//! │  Prazo: <lead time>                                                     │
//! │                                                                         │
//! │              ______________________                                     │
//! │                   <signatory>                                           │
//! │                 <signatory role>                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use printcost_core::validation::validate_client_name;
use printcost_core::{format_currency, QuoteItem};

use crate::error::{ReportError, ReportResult};

/// Client name used when none is given.
pub const DEFAULT_CLIENT: &str = "Cliente Final";

/// Column headers of the item table.
pub const TABLE_HEADERS: [&str; 7] = [
    "Qtd.",
    "Descrição",
    "Material",
    "Peso est. un/g",
    "Tempo em horas",
    "Pintura manual",
    "Valor",
];

// =============================================================================
// Report Settings
// =============================================================================

/// Business details printed around the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub business_name: String,
    pub payment_terms: String,
    pub lead_time: String,

    /// Name above the signature line; no signature block when `None`.
    pub signatory: Option<String>,
    pub signatory_role: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            business_name: "PrintCost 3D".to_string(),
            payment_terms: "40% junto ao pedido e 60% na entrega".to_string(),
            lead_time: "7 Dias Úteis".to_string(),
            signatory: None,
            signatory_role: "Orçamentista".to_string(),
        }
    }
}

// =============================================================================
// Report Lines
// =============================================================================

/// One row of the item table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub quantity: u32,
    pub description: String,
    pub material: String,
    /// Per-unit weight, `"50.00g"`.
    pub weight: String,
    /// Per-unit print time, `"1.5h"`.
    pub time: String,
    pub painting: String,
    /// Final price, `"R$ 20.00"`.
    pub value: String,
}

impl ReportLine {
    fn from_item(item: &QuoteItem) -> Self {
        ReportLine {
            quantity: item.quantity(),
            description: item.item_name().to_string(),
            material: item.material_type().to_string(),
            weight: format!("{:.2}g", item.weight_g()),
            time: format!("{:.1}h", item.print_hours()),
            painting: item.painting().to_string(),
            value: format_currency(item.final_price()),
        }
    }

    /// Cells in [`TABLE_HEADERS`] order.
    pub fn cells(&self) -> [String; 7] {
        [
            self.quantity.to_string(),
            self.description.clone(),
            self.material.clone(),
            self.weight.clone(),
            self.time.clone(),
            self.painting.clone(),
            self.value.clone(),
        ]
    }
}

// =============================================================================
// Quote Report
// =============================================================================

/// A quote ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReport {
    pub client_name: String,
    pub date: NaiveDate,
    pub lines: Vec<ReportLine>,
    /// Sum of the items' final prices.
    pub total: f64,
}

impl QuoteReport {
    /// Builds the report for `items`, in quote order.
    ///
    /// ## Errors
    /// - [`ReportError::EmptyQuote`] when `items` is empty
    /// - [`ReportError::Validation`] when the client name is too long
    pub fn build(client_name: &str, items: &[QuoteItem], date: NaiveDate) -> ReportResult<Self> {
        if items.is_empty() {
            return Err(ReportError::EmptyQuote);
        }
        validate_client_name(client_name)?;

        let client_name = match client_name.trim() {
            "" => DEFAULT_CLIENT.to_string(),
            name => name.to_string(),
        };

        Ok(QuoteReport {
            client_name,
            date,
            lines: items.iter().map(ReportLine::from_item).collect(),
            total: items.iter().map(QuoteItem::final_price).sum(),
        })
    }

    /// `dd/mm/yyyy`.
    pub fn date_label(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn total_label(&self) -> String {
        format!("Total: {}", format_currency(self.total))
    }
}

/// File name for an exported quote: `orcamento_<client>.<ext>`.
///
/// Whitespace and characters that would break out of the file name (path
/// separators, `:*?"<>|`, control characters) become underscores; an empty
/// name uses "Cliente Final".
///
/// ## Example
/// ```rust
/// use printcost_report::default_file_name;
///
/// assert_eq!(default_file_name("Maria Souza", "pdf"), "orcamento_Maria_Souza.pdf");
/// ```
pub fn default_file_name(client_name: &str, extension: &str) -> String {
    let client = match client_name.trim() {
        "" => DEFAULT_CLIENT,
        name => name,
    };
    let client: String = client
        .chars()
        .map(|c| if is_file_name_safe(c) { c } else { '_' })
        .collect();
    format!("orcamento_{}.{}", client, extension)
}

fn is_file_name_safe(c: char) -> bool {
    !(c.is_whitespace()
        || c.is_control()
        || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
}

// =============================================================================
// Unit Tests
// =============================================================================
