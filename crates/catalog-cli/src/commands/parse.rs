use catalog_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    layout: bool,
) -> Result<(), catalog_core::error::CatalogError> {
    let extractor = PdftotextExtractor::new().with_layout(layout);
    extractor.ensure_available()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let parsed = catalog_core::parse_pdf(&pdf_bytes, &extractor)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            output::json::write(&parsed, &path)?;
            eprintln!(
                "Parsed {} record(s), written to {}",
                parsed.records.len(),
                path.display()
            );
            if !parsed.unparsed.is_empty() {
                eprintln!("  {} line(s) could not be parsed", parsed.unparsed.len());
            }
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => output::table::print_records(&parsed),
        },
    }

    Ok(())
}
