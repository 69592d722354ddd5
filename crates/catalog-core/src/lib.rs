pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod pricing;
pub mod rate;
pub mod workbook;

use error::CatalogError;
use extraction::{PageContent, PdfExtractor};
use model::ParsedCatalog;
use parsing::diagnostics::{DiagnosticSink, UnparsedLine};

/// Main API entry point: extract a catalog PDF and parse every page.
///
/// Fails only when extraction fails or no page yields a single record;
/// individual bad lines end up in `ParsedCatalog::unparsed`.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<ParsedCatalog, CatalogError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted catalog text"
    );

    let parsed = parse_pages(&pages);
    if parsed.records.is_empty() {
        return Err(CatalogError::NoRecords);
    }

    Ok(parsed)
}

/// Parse pages independently and concatenate the results in page order.
pub fn parse_pages(pages: &[PageContent]) -> ParsedCatalog {
    let mut catalog = ParsedCatalog::default();

    for page in pages {
        let mut sink = PageSink {
            page_number: page.page_number,
            lines: &mut catalog.unparsed,
        };
        let records = parsing::parse_page(&page.text, &mut sink);
        tracing::debug!(
            page = page.page_number,
            records = records.len(),
            "parsed catalog page"
        );
        catalog.records.extend(records);
    }

    catalog
}

/// Collects dropped lines and logs each one with its page number.
struct PageSink<'a> {
    page_number: usize,
    lines: &'a mut Vec<UnparsedLine>,
}

impl DiagnosticSink for PageSink<'_> {
    fn unparsed(&mut self, line: UnparsedLine) {
        tracing::warn!(
            page = self.page_number,
            line = %line.line_text,
            reason = %line.reason,
            "could not parse catalog line"
        );
        self.lines.push(line);
    }
}
