pub mod diagnostics;
pub mod fallback;
pub mod primary;

use crate::model::ProductRecord;
use diagnostics::{DiagnosticSink, UnparsedLine, UnparsedReason};
pub use fallback::parse_fallback;
pub use primary::parse_primary;

/// Parse one page of extracted catalog text into product records.
///
/// Header, metadata and blank lines are skipped silently. Lines that neither
/// strategy can parse are reported to `sink` once each and dropped. Record
/// order follows line order.
pub fn parse_page(text: &str, sink: &mut dyn DiagnosticSink) -> Vec<ProductRecord> {
    let mut records = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if is_skippable_line(line) {
            continue;
        }

        match try_parse_line(line) {
            Ok(record) => records.push(record),
            Err(reason) => sink.unparsed(UnparsedLine {
                line_text: line.to_string(),
                reason,
            }),
        }
    }

    records
}

/// Parse a single line: strict grammar first, then the positional fallback.
pub fn parse_line(line: &str) -> Option<ProductRecord> {
    try_parse_line(line).ok()
}

/// Like [`parse_line`], but says why the fallback rejected the line.
pub fn try_parse_line(line: &str) -> Result<ProductRecord, UnparsedReason> {
    match parse_primary(line) {
        Some(record) => Ok(record),
        None => parse_fallback(line),
    }
}

/// Blank lines, collection banners and column header rows.
pub fn is_skippable_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty()
        || line.contains("COLLECTION:")
        || (line.contains("ARTICLE") && line.contains("PRODUCT") && line.contains("PRICE"))
        || (line.contains("PRICE") && line.contains("CURRENCY") && line.contains("DATE"))
}
