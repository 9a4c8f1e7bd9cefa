//! `printcost export`
//!
//! Renders the quote for a client and writes the document to disk.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use printcost_core::QuoteItem;
use printcost_report::{
    default_file_name, PdfExporter, QuoteReport, ReportExporter, TextExporter,
};
use tracing::info;

use crate::cli::{ExportArgs, ExportFormat};
use crate::error::AppResult;
use crate::state::ReportConfig;

pub fn run(args: &ExportArgs, config: &ReportConfig, items: &[QuoteItem]) -> AppResult<()> {
    let today = chrono::Local::now().date_naive();
    let path = export(args, config, items, today)?;

    println!("Orçamento salvo em {}", path.display());
    Ok(())
}

/// Builds, renders and writes the document; returns where it was written.
pub fn export(
    args: &ExportArgs,
    config: &ReportConfig,
    items: &[QuoteItem],
    date: NaiveDate,
) -> AppResult<PathBuf> {
    let report = QuoteReport::build(&args.client, items, date)?;
    let exporter = exporter(args.format, config);

    let bytes = exporter.render(&report)?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(&args.client, exporter.extension())));
    write_document(&path, &bytes)?;

    info!(
        path = %path.display(),
        client = %report.client_name,
        items = report.lines.len(),
        bytes = bytes.len(),
        "Quote exported"
    );
    Ok(path)
}

fn exporter(format: ExportFormat, config: &ReportConfig) -> Box<dyn ReportExporter> {
    match format {
        ExportFormat::Pdf => Box::new(PdfExporter::new(
            config.fonts_dir.clone(),
            config.font_family.clone(),
            config.settings(),
        )),
        ExportFormat::Text => Box::new(TextExporter::new(config.settings())),
    }
}

fn write_document(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printcost_core::{calculate, ItemDetails, Painting, ParameterSet};

    use crate::error::ErrorCode;

    fn items() -> Vec<QuoteItem> {
        let params = ParameterSet {
            filament_price: 100.0,
            weight_g: 50.0,
            print_hours: 1.5,
            margin_pct: 100.0,
            ..ParameterSet::default()
        };
        let details = ItemDetails::new("Vaso", "PETG", 3, Painting::Sim).unwrap();
        vec![QuoteItem::new(details, &params, calculate(&params).unwrap())]
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("printcost-export-{}", uuid::Uuid::new_v4()))
    }

    fn text_args(output: PathBuf) -> ExportArgs {
        ExportArgs {
            client: "Maria Souza".to_string(),
            format: ExportFormat::Text,
            output: Some(output),
        }
    }

    #[test]
    fn test_text_export_writes_document() {
        let dir = temp_dir();
        let output = dir.join("nested").join("quote.txt");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let path = export(&text_args(output.clone()), &ReportConfig::default(), &items(), date)
            .unwrap();
        assert_eq!(path, output);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Cliente: Maria Souza"));
        assert!(text.contains("Data: 19/10/2026"));
        assert!(text.contains("Vaso"));
        assert!(text.contains("Total: R$ 30.00"));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_empty_quote_is_not_exported() {
        let dir = temp_dir();
        let output = dir.join("quote.txt");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let err = export(&text_args(output.clone()), &ReportConfig::default(), &[], date)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(!output.exists());
    }

    #[test]
    fn test_pdf_export_without_fonts_fails() {
        let dir = temp_dir();
        let config = ReportConfig {
            fonts_dir: dir.join("no-fonts"),
            ..ReportConfig::default()
        };
        let args = ExportArgs {
            client: String::new(),
            format: ExportFormat::Pdf,
            output: Some(dir.join("quote.pdf")),
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let err = export(&args, &config, &items(), date).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(!dir.join("quote.pdf").exists());
    }
}
