use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parsing::diagnostics::UnparsedLine;

/// One product line recovered from a catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub article: String,
    pub fabric_code: String,
    pub product_tipology: String,
    /// Whole euros, thousands separators already removed.
    pub price_eur: u64,
    pub currency: String,
    pub date: String,
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ARTICLE: {}, FABRIC: {}, TIPOLOGY: {}, PRICE: {} €",
            self.article, self.fabric_code, self.product_tipology, self.price_eur
        )
    }
}

/// Records from every page of a catalog, in page order, plus the lines
/// that neither parsing strategy could recover.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedCatalog {
    pub records: Vec<ProductRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unparsed: Vec<UnparsedLine>,
}
