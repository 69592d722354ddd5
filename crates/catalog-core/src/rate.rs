use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::CatalogError;
use crate::pricing::f64_to_decimal;

pub const CBR_DAILY_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// Somewhere to ask for the current euro rate.
pub trait RateSource {
    fn eur_rate(&self) -> Result<Decimal, CatalogError>;

    /// Name of this source (for diagnostics).
    fn name(&self) -> &str;
}

/// Daily rates published by the Central Bank of Russia, as JSON.
pub struct CbrRateSource {
    url: String,
    timeout: Duration,
}

impl CbrRateSource {
    pub fn new() -> Self {
        CbrRateSource {
            url: CBR_DAILY_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl Default for CbrRateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RateSource for CbrRateSource {
    fn eur_rate(&self) -> Result<Decimal, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| CatalogError::RateLookup(e.to_string()))?;

        let body = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| CatalogError::RateLookup(format!("request to {} failed: {e}", self.url)))?;

        parse_cbr_response(&body)
    }

    fn name(&self) -> &str {
        "CBR"
    }
}

#[derive(Deserialize)]
struct CbrDaily {
    #[serde(rename = "Valute")]
    valute: CbrValute,
}

#[derive(Deserialize)]
struct CbrValute {
    #[serde(rename = "EUR")]
    eur: CbrCurrency,
}

#[derive(Deserialize)]
struct CbrCurrency {
    #[serde(rename = "Value")]
    value: f64,
}

/// Pull `Valute.EUR.Value` out of the CBR daily JSON.
pub fn parse_cbr_response(body: &str) -> Result<Decimal, CatalogError> {
    let daily: CbrDaily = serde_json::from_str(body)
        .map_err(|e| CatalogError::RateLookup(format!("unexpected CBR response: {e}")))?;

    let value = daily.valute.eur.value;
    if !(value.is_finite() && value > 0.0) {
        return Err(CatalogError::RateLookup(format!(
            "CBR returned a non-positive EUR rate: {value}"
        )));
    }
    f64_to_decimal(value)
        .ok_or_else(|| CatalogError::RateLookup(format!("EUR rate {value} is not representable")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateOrigin {
    Source(String),
    WorkbookFallback,
}

impl fmt::Display for RateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateOrigin::Source(name) => write!(f, "{name}"),
            RateOrigin::WorkbookFallback => write!(f, "workbook (B1)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    pub rate: Decimal,
    pub origin: RateOrigin,
}

/// Ask `source` once; on any failure use the workbook rate instead.
pub fn resolve_rate(source: &dyn RateSource, fallback: Decimal) -> ResolvedRate {
    match source.eur_rate() {
        Ok(rate) => {
            tracing::info!(source = source.name(), %rate, "fetched EUR rate");
            ResolvedRate {
                rate,
                origin: RateOrigin::Source(source.name().to_string()),
            }
        }
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, fallback = %fallback, "EUR rate lookup failed, using workbook rate");
            ResolvedRate {
                rate: fallback,
                origin: RateOrigin::WorkbookFallback,
            }
        }
    }
}
