//! Plain-text exporter.
//!
//! Same content as the PDF, as UTF-8 text with a box-drawn item table.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};

use crate::error::ReportResult;
use crate::report::{QuoteReport, ReportSettings, TABLE_HEADERS};
use crate::ReportExporter;

/// Text output.
#[derive(Debug, Clone, Default)]
pub struct TextExporter {
    settings: ReportSettings,
}

impl TextExporter {
    pub fn new(settings: ReportSettings) -> Self {
        TextExporter { settings }
    }

    /// Renders the report as a string.
    pub fn render_string(&self, report: &QuoteReport) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(TABLE_HEADERS.to_vec());
        for line in &report.lines {
            table.add_row(line.cells().to_vec());
        }
        if let Some(column) = table.column_mut(TABLE_HEADERS.len() - 1) {
            column.set_cell_alignment(CellAlignment::Right);
        }

        let mut out = vec![
            "ORÇAMENTO".to_string(),
            self.settings.business_name.clone(),
            String::new(),
            format!("Cliente: {}", report.client_name),
            format!("Data: {}", report.date_label()),
            String::new(),
            table.to_string(),
            String::new(),
            report.total_label(),
            String::new(),
            format!("Pagamento: {}", self.settings.payment_terms),
            format!("Prazo: {}", self.settings.lead_time),
        ];

        if let Some(signatory) = &self.settings.signatory {
            out.push(String::new());
            out.push(String::new());
            out.push("________________________________".to_string());
            out.push(signatory.clone());
            out.push(self.settings.signatory_role.clone());
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

impl ReportExporter for TextExporter {
    fn render(&self, report: &QuoteReport) -> ReportResult<Vec<u8>> {
        Ok(self.render_string(report).into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{sample_date, sample_items};

    fn report() -> QuoteReport {
        QuoteReport::build("Maria Souza", &sample_items(), sample_date()).unwrap()
    }

    #[test]
    fn test_text_contains_every_section() {
        let text = TextExporter::default().render_string(&report());

        assert!(text.starts_with("ORÇAMENTO\n"));
        assert!(text.contains("Cliente: Maria Souza"));
        assert!(text.contains("Data: 19/10/2026"));
        assert!(text.contains("Descrição"));
        assert!(text.contains("Vaso"));
        assert!(text.contains("Miniatura"));
        assert!(text.contains("R$ 20.00"));
        assert!(text.contains("Total: R$ 30.00"));
        assert!(text.contains("Pagamento: 40% junto ao pedido e 60% na entrega"));
        assert!(text.contains("Prazo: 7 Dias Úteis"));
        assert!(!text.contains("Orçamentista"));
    }

    #[test]
    fn test_items_keep_quote_order() {
        let text = TextExporter::default().render_string(&report());
        let vaso = text.find("Vaso").unwrap();
        let miniatura = text.find("Miniatura").unwrap();
        assert!(vaso < miniatura);
    }

    #[test]
    fn test_signature_block() {
        let settings = ReportSettings {
            signatory: Some("Ana Lima".to_string()),
            ..ReportSettings::default()
        };
        let bytes = TextExporter::new(settings).render(&report()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Ana Lima\nOrçamentista"));
    }
}
