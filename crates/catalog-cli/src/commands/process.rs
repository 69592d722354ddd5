use catalog_core::error::CatalogError;
use catalog_core::extraction::pdftotext::PdftotextExtractor;
use catalog_core::pricing::{price_records, PricedLine, PricingSettings, OUTPUT_HEADER};
use catalog_core::rate::{resolve_rate, CbrRateSource, RateOrigin, ResolvedRate};
use catalog_core::workbook;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::output::table;

const PREVIEW_RECORDS: usize = 5;

pub struct ProcessArgs {
    pub pdf_file: PathBuf,
    pub workbook: PathBuf,
    pub output_file: Option<PathBuf>,
    pub offline: bool,
    pub margin: Option<Decimal>,
    pub layout: bool,
}

pub fn run(args: ProcessArgs) -> Result<(), CatalogError> {
    // Parse the catalog
    let extractor = PdftotextExtractor::new().with_layout(args.layout);
    extractor.ensure_available()?;

    eprintln!("Reading catalog {}", args.pdf_file.display());
    let pdf_bytes = std::fs::read(&args.pdf_file)?;
    let parsed = catalog_core::parse_pdf(&pdf_bytes, &extractor)?;

    eprintln!("Extracted {} record(s)", parsed.records.len());
    if !parsed.unparsed.is_empty() {
        eprintln!("  {} line(s) could not be parsed", parsed.unparsed.len());
    }
    for line in table::preview(&parsed.records, PREVIEW_RECORDS) {
        eprintln!("  {line}");
    }

    // Load settings and translations
    let workbook_bytes = std::fs::read(&args.workbook)?;
    let data = workbook::load_workbook(&workbook_bytes)?;

    let resolved = if args.offline {
        ResolvedRate {
            rate: data.settings.exchange_rate,
            origin: RateOrigin::WorkbookFallback,
        }
    } else {
        resolve_rate(&CbrRateSource::new(), data.settings.exchange_rate)
    };

    let settings = PricingSettings {
        exchange_rate: resolved.rate,
        margin: args.margin.unwrap_or(data.settings.margin),
        start_position: data.settings.start_position,
        measure_unit: data.settings.measure_unit,
    };

    eprintln!("\nEUR rate: {} (source: {})", settings.exchange_rate, resolved.origin);
    eprintln!(
        "Margin: {}%",
        (settings.margin * Decimal::ONE_HUNDRED).normalize()
    );
    eprintln!("Start position: {}", settings.start_position);
    eprintln!("Measure unit: {}", settings.measure_unit);
    eprintln!("Translations: {}", data.translations.len());

    // Price and write
    let lines = price_records(&parsed.records, &settings, &data.translations)?;

    match args.output_file {
        Some(path) => {
            std::fs::write(&path, render_lines(&lines))?;
            eprintln!("\nWrote {} line(s) to {}", lines.len(), path.display());
        }
        None => {
            let updated = workbook::update_workbook(&workbook_bytes, &lines)?;
            std::fs::write(&args.workbook, updated)?;
            eprintln!(
                "\nWrote {} line(s) to sheet '{}' of {}",
                lines.len(),
                workbook::WORK_SHEET,
                args.workbook.display()
            );
        }
    }

    Ok(())
}

/// Header line followed by one line per priced record.
fn render_lines(lines: &[PricedLine]) -> String {
    let mut out = String::from(OUTPUT_HEADER);
    out.push('\n');
    for line in lines {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}
