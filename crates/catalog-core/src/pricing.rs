use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

use crate::error::CatalogError;
use crate::model::ProductRecord;

/// First line of the generated output.
pub const OUTPUT_HEADER: &str = "ItemCode,Price,Measure,Name";

/// Margin used when the workbook leaves it blank (3%).
pub const DEFAULT_MARGIN: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct PricingSettings {
    /// Local currency per euro.
    pub exchange_rate: Decimal,
    /// Fractional margin, e.g. 0.03 for 3%.
    pub margin: Decimal,
    /// Position number given to the first record.
    pub start_position: u64,
    pub measure_unit: String,
}

/// Vendor product name -> local product name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations(HashMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vendor_name: impl Into<String>, local_name: impl Into<String>) {
        self.0.insert(vendor_name.into(), local_name.into());
    }

    /// Exact match only; unknown names come back unchanged.
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Translations(iter.into_iter().collect())
    }
}

/// One output row; `Display` renders the CSV line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub item_code: String,
    /// Price in minor units of the local currency (kopecks).
    pub price_minor: u64,
    pub measure_unit: String,
    pub name: String,
}

impl fmt::Display for PricedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.item_code, self.price_minor, self.measure_unit, self.name
        )
    }
}

/// `price_eur × rate × (1 + margin) × 100`, truncated toward zero.
pub fn price_minor_units(
    price_eur: u64,
    exchange_rate: Decimal,
    margin: Decimal,
) -> Result<u64, CatalogError> {
    let overflow = || CatalogError::PriceOverflow { price_eur };

    Decimal::from(price_eur)
        .checked_mul(exchange_rate)
        .and_then(|v| v.checked_mul(Decimal::ONE + margin))
        .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)?
        .trunc()
        .to_u64()
        .ok_or_else(overflow)
}

/// Position number followed by article and fabric code, spaces removed.
pub fn item_code(position: u64, record: &ProductRecord) -> String {
    format!("{}{}{}", position, record.article, record.fabric_code).replace(' ', "")
}

/// Price and name every record, numbering positions from `start_position`.
pub fn price_records(
    records: &[ProductRecord],
    settings: &PricingSettings,
    translations: &Translations,
) -> Result<Vec<PricedLine>, CatalogError> {
    records
        .iter()
        .zip(settings.start_position..)
        .map(|(record, position)| {
            Ok(PricedLine {
                item_code: item_code(position, record),
                price_minor: price_minor_units(
                    record.price_eur,
                    settings.exchange_rate,
                    settings.margin,
                )?,
                measure_unit: settings.measure_unit.clone(),
                name: translations.translate(&record.product_tipology).to_string(),
            })
        })
        .collect()
}

/// Convert f64 to Decimal, preserving reasonable precision.
///
/// Uses string round-trip to avoid floating-point artifacts
/// (e.g., 100.35_f64 becoming 100.3499999...).
pub(crate) fn f64_to_decimal(f: f64) -> Option<Decimal> {
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(article: &str, fabric: &str, tipology: &str, price: u64) -> ProductRecord {
        ProductRecord {
            article: article.into(),
            fabric_code: fabric.into(),
            product_tipology: tipology.into(),
            price_eur: price,
            currency: "EUR".into(),
            date: "01.08.25".into(),
        }
    }

    fn settings() -> PricingSettings {
        PricingSettings {
            exchange_rate: dec!(100.5),
            margin: dec!(0.03),
            start_position: 1,
            measure_unit: "шт".into(),
        }
    }

    #[test]
    fn test_default_margin_is_three_percent() {
        assert_eq!(DEFAULT_MARGIN, dec!(0.03));
    }

    #[test]
    fn test_price_minor_units() {
        // 1850 * 100.5 * 1.03 = 191502.75
        assert_eq!(
            price_minor_units(1850, dec!(100.5), dec!(0.03)).unwrap(),
            19_150_275
        );
        assert_eq!(price_minor_units(0, dec!(100.5), dec!(0.03)).unwrap(), 0);
    }

    #[test]
    fn test_price_minor_units_truncates() {
        // 1 * 91.2345 * 1.03 * 100 = 9397.1535
        assert_eq!(
            price_minor_units(1, dec!(91.2345), dec!(0.03)).unwrap(),
            9397
        );
    }

    #[test]
    fn test_price_minor_units_overflow() {
        assert!(matches!(
            price_minor_units(u64::MAX, dec!(1000000000), dec!(0.03)),
            Err(CatalogError::PriceOverflow { .. })
        ));
    }

    #[test]
    fn test_item_code() {
        let rec = record("E7T2", "07300M", "SHIRT", 1);
        assert_eq!(item_code(1, &rec), "1E7T207300M");
        let spaced = record("E7 T2", "073 00M", "SHIRT", 1);
        assert_eq!(item_code(12, &spaced), "12E7T207300M");
    }

    #[test]
    fn test_translations_pass_through_unknown() {
        let mut tr = Translations::new();
        tr.insert("PLAIN WEAVE SHIRT", "Рубашка");
        assert_eq!(tr.translate("PLAIN WEAVE SHIRT"), "Рубашка");
        assert_eq!(tr.translate("CASUAL JACKET"), "CASUAL JACKET");
        assert_eq!(tr.len(), 1);
    }

    #[test]
    fn test_price_records_numbers_positions() {
        let mut tr = Translations::new();
        tr.insert("SHIRT", "Рубашка");
        let records = vec![
            record("A1", "B1", "SHIRT", 100),
            record("A2", "B2", "TIE", 10),
        ];
        let mut s = settings();
        s.start_position = 7;

        let lines = price_records(&records, &s, &tr).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_code, "7A1B1");
        assert_eq!(lines[1].item_code, "8A2B2");
        assert_eq!(lines[0].name, "Рубашка");
        assert_eq!(lines[1].name, "TIE");
        // 100 * 100.5 * 1.03 * 100
        assert_eq!(lines[0].price_minor, 1_035_150);
        assert_eq!(lines[0].to_string(), "7A1B1,1035150,шт,Рубашка");
    }

    #[test]
    fn test_f64_to_decimal_preserves_precision() {
        assert_eq!(f64_to_decimal(100.35), Some(dec!(100.35)));
        assert_eq!(f64_to_decimal(91.0), Some(dec!(91)));
    }
}
