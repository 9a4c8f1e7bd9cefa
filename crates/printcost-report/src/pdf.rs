//! # PDF Exporter
//!
//! Renders a [`QuoteReport`] with genpdf.
//!
//! Fonts are loaded from `<fonts_dir>/<family>-{Regular,Bold,Italic,BoldItalic}.ttf`;
//! genpdf embeds them so accented labels ("Descrição", "Não") render.

use std::path::PathBuf;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, SimplePageDecorator};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::report::{QuoteReport, ReportSettings, TABLE_HEADERS};
use crate::ReportExporter;

/// Relative column widths of the item table.
const COLUMN_WEIGHTS: [usize; 7] = [1, 4, 2, 2, 2, 2, 2];

const SIGNATURE_LINE: &str = "________________________________";

/// PDF output.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    fonts_dir: PathBuf,
    font_family: String,
    settings: ReportSettings,
}

impl PdfExporter {
    pub fn new(
        fonts_dir: impl Into<PathBuf>,
        font_family: impl Into<String>,
        settings: ReportSettings,
    ) -> Self {
        PdfExporter {
            fonts_dir: fonts_dir.into(),
            font_family: font_family.into(),
            settings,
        }
    }

    fn load_fonts(&self) -> ReportResult<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
        genpdf::fonts::from_files(&self.fonts_dir, &self.font_family, None).map_err(|e| {
            ReportError::FontNotFound {
                dir: self.fonts_dir.clone(),
                family: self.font_family.clone(),
                reason: e.to_string(),
            }
        })
    }
}

impl ReportExporter for PdfExporter {
    fn render(&self, report: &QuoteReport) -> ReportResult<Vec<u8>> {
        let fonts = self.load_fonts()?;

        let mut doc = Document::new(fonts);
        doc.set_title(format!("Orçamento - {}", report.client_name));
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        // --- header ---
        doc.push(Paragraph::new("ORÇAMENTO").styled(Style::new().bold().with_font_size(24)));
        doc.push(
            Paragraph::new(self.settings.business_name.as_str())
                .styled(Style::new().bold().with_font_size(14)),
        );
        doc.push(Break::new(1));
        doc.push(Paragraph::new(format!("Cliente: {}", report.client_name)));
        doc.push(Paragraph::new(format!("Data: {}", report.date_label())));
        doc.push(Break::new(1.5));

        // --- items ---
        let mut table = TableLayout::new(COLUMN_WEIGHTS.to_vec());
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let bold = Style::new().bold();
        let mut header = table.row();
        for title in TABLE_HEADERS {
            header = header.element(Paragraph::new(title).styled(bold));
        }
        header.push()?;

        let body = Style::new().with_font_size(9);
        for line in &report.lines {
            let mut row = table.row();
            for cell in line.cells() {
                row = row.element(Paragraph::new(cell).styled(body));
            }
            row.push()?;
        }
        doc.push(table);
        doc.push(Break::new(1.5));

        // --- footer ---
        doc.push(
            Paragraph::new(report.total_label())
                .aligned(Alignment::Right)
                .styled(Style::new().bold().with_font_size(14)),
        );
        doc.push(Break::new(1.5));
        doc.push(Paragraph::new(format!("Pagamento: {}", self.settings.payment_terms)));
        doc.push(Paragraph::new(format!("Prazo: {}", self.settings.lead_time)));

        if let Some(signatory) = &self.settings.signatory {
            let italic = Style::new().italic();
            doc.push(Break::new(3));
            doc.push(Paragraph::new(SIGNATURE_LINE).aligned(Alignment::Center));
            doc.push(
                Paragraph::new(signatory.as_str())
                    .aligned(Alignment::Center)
                    .styled(italic),
            );
            doc.push(
                Paragraph::new(self.settings.signatory_role.as_str())
                    .aligned(Alignment::Center)
                    .styled(italic),
            );
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)?;

        debug!(bytes = buffer.len(), lines = report.lines.len(), "Rendered PDF");
        Ok(buffer)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{sample_date, sample_items};

    #[test]
    fn test_missing_fonts_are_reported() {
        let exporter = PdfExporter::new(
            "/nonexistent/printcost/fonts",
            "LiberationSans",
            ReportSettings::default(),
        );
        let report = QuoteReport::build("Maria", &sample_items(), sample_date()).unwrap();

        let err = exporter.render(&report).unwrap_err();
        match err {
            ReportError::FontNotFound { family, .. } => assert_eq!(family, "LiberationSans"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(exporter.extension(), "pdf");
    }
}
