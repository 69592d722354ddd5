use regex::Regex;
use std::sync::OnceLock;

use crate::model::ProductRecord;

/// Vendor row layout: `ARTICLE FABRIC TIPOLOGY PRICE € CURRENCY DATE`.
///
/// The tipology class has no digits, so names like "MODEL 2.0" never match
/// here and are left to the fallback.
fn product_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([A-Z0-9]+)\s+([A-Z0-9]+)\s+([A-Za-z\s\-]+)\s+([0-9\s]+)\s*€\s*([A-Z]+)\s+([0-9.]+)$",
        )
        .unwrap()
    })
}

/// Match a trimmed line against the vendor's fixed row layout.
///
/// Returns None when the grammar doesn't match or the price group holds no
/// usable number.
pub fn parse_primary(line: &str) -> Option<ProductRecord> {
    let caps = product_line_re().captures(line.trim())?;

    let price_eur = parse_spaced_price(&caps[4])?;

    Some(ProductRecord {
        article: caps[1].to_string(),
        fabric_code: caps[2].to_string(),
        product_tipology: caps[3].trim().to_string(),
        price_eur,
        currency: caps[5].to_string(),
        date: caps[6].to_string(),
    })
}

/// "1 850" -> 1850. Any whitespace counts as a thousands separator.
pub(crate) fn parse_spaced_price(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    digits.parse().ok()
}
