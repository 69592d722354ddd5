#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no product lines could be parsed from the catalog")]
    NoRecords,

    #[error("failed to read settings workbook: {0}")]
    Workbook(String),

    #[error("exchange rate lookup failed: {0}")]
    RateLookup(String),

    #[error("price of {price_eur} EUR overflows after conversion")]
    PriceOverflow { price_eur: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
