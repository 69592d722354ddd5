use crate::model::ProductRecord;
use crate::parsing::diagnostics::UnparsedReason;
use crate::parsing::primary::parse_spaced_price;

pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_DATE: &str = "01.08.25";

const MIN_TOKENS: usize = 6;

/// Recover a record from whitespace-separated tokens when the strict
/// grammar fails.
///
/// The price sits either in the token right before a bare `€` token
/// (`... 450 € EUR ...`) or in front of the sign inside the same token
/// (`... 450€ EUR ...`). Everything from token 2 up to the price is the
/// tipology. A bare `€` at position 3 leaves a single token that serves as
/// both tipology and price.
pub fn parse_fallback(line: &str) -> Result<ProductRecord, UnparsedReason> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(UnparsedReason::TooFewTokens {
            count: tokens.len(),
        });
    }

    let euro_pos = tokens
        .iter()
        .position(|t| t.contains('€'))
        .ok_or(UnparsedReason::NoEuroToken)?;
    if euro_pos < 3 {
        return Err(UnparsedReason::EuroTooEarly { position: euro_pos });
    }

    let glued_price = tokens[euro_pos]
        .split('€')
        .next()
        .filter(|prefix| !prefix.is_empty());

    let (tipology_tokens, price_text) = match glued_price {
        Some(prefix) => (&tokens[2..euro_pos], prefix),
        None if euro_pos > 3 => (&tokens[2..euro_pos - 1], tokens[euro_pos - 1]),
        None => (&tokens[2..3], tokens[euro_pos - 1]),
    };

    let price_eur = parse_spaced_price(price_text).ok_or_else(|| UnparsedReason::InvalidPrice {
        token: price_text.to_string(),
    })?;

    Ok(ProductRecord {
        article: tokens[0].to_string(),
        fabric_code: tokens[1].to_string(),
        product_tipology: tipology_tokens.join(" "),
        price_eur,
        currency: tokens
            .get(euro_pos + 1)
            .copied()
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string(),
        date: tokens
            .get(euro_pos + 2)
            .copied()
            .unwrap_or(DEFAULT_DATE)
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glued_euro_multiword_tipology() {
        let rec = parse_fallback("AB1   CD2  CASUAL\tJACKET 450€ EUR 02.08.25").unwrap();
        assert_eq!(rec.article, "AB1");
        assert_eq!(rec.fabric_code, "CD2");
        assert_eq!(rec.product_tipology, "CASUAL JACKET");
        assert_eq!(rec.price_eur, 450);
        assert_eq!(rec.currency, "EUR");
        assert_eq!(rec.date, "02.08.25");
    }

    #[test]
    fn test_bare_euro_uses_preceding_token() {
        // Digits in the tipology keep this line away from the strict grammar.
        let rec = parse_fallback("X9 F1 MODEL 2.0 JACKET 780 € EUR 03.08.25").unwrap();
        assert_eq!(rec.product_tipology, "MODEL 2.0 JACKET");
        assert_eq!(rec.price_eur, 780);
        assert_eq!(rec.date, "03.08.25");
    }

    #[test]
    fn test_bare_euro_at_position_four_keeps_single_tipology_token() {
        let rec = parse_fallback("A1 B2 SHIRT 100 € EUR 01.08.25").unwrap();
        assert_eq!(rec.product_tipology, "SHIRT");
        assert_eq!(rec.price_eur, 100);
    }

    #[test]
    fn test_bare_euro_splits_thousands_into_tipology() {
        // Only the token right before the sign is the price.
        let rec = parse_fallback("A1 B2 COAT 1 850 € EUR 01.08.25").unwrap();
        assert_eq!(rec.product_tipology, "COAT 1");
        assert_eq!(rec.price_eur, 850);
    }

    #[test]
    fn test_glued_euro_at_position_three() {
        let rec = parse_fallback("A1 B2 BELT 95€ EUR 01.08.25").unwrap();
        assert_eq!(rec.product_tipology, "BELT");
        assert_eq!(rec.price_eur, 95);
    }

    #[test]
    fn test_missing_date_uses_default() {
        let rec = parse_fallback("A1 B2 LONG WOOL COAT 300 € EUR").unwrap();
        assert_eq!(rec.product_tipology, "LONG WOOL COAT");
        assert_eq!(rec.price_eur, 300);
        assert_eq!(rec.currency, "EUR");
        assert_eq!(rec.date, DEFAULT_DATE);
    }

    #[test]
    fn test_missing_currency_and_date_use_defaults() {
        let rec = parse_fallback("A1 B2 LONG WOOL COAT 300€").unwrap();
        assert_eq!(rec.product_tipology, "LONG WOOL COAT");
        assert_eq!(rec.currency, DEFAULT_CURRENCY);
        assert_eq!(rec.date, DEFAULT_DATE);
    }

    #[test]
    fn test_too_few_tokens() {
        assert_eq!(
            parse_fallback("A1 B2 SHIRT 100"),
            Err(UnparsedReason::TooFewTokens { count: 4 })
        );
    }

    #[test]
    fn test_no_euro_token() {
        assert_eq!(
            parse_fallback("A1 B2 SHIRT 100 EUR 01.08.25"),
            Err(UnparsedReason::NoEuroToken)
        );
    }

    #[test]
    fn test_euro_too_early() {
        assert_eq!(
            parse_fallback("A1 B2 € SHIRT 100 EUR 01.08.25"),
            Err(UnparsedReason::EuroTooEarly { position: 2 })
        );
    }

    #[test]
    fn test_non_numeric_price() {
        assert_eq!(
            parse_fallback("A1 B2 SHIRT BLUE € EUR 01.08.25"),
            Err(UnparsedReason::InvalidPrice {
                token: "BLUE".into()
            })
        );
    }

    #[test]
    fn test_euro_at_position_three_reuses_tipology_token_as_price() {
        // Single tipology token doubles as the price token.
        assert_eq!(
            parse_fallback("A1 B2 SHIRT € EUR 01.08.25"),
            Err(UnparsedReason::InvalidPrice {
                token: "SHIRT".into()
            })
        );
        let rec = parse_fallback("A1 B2 500 € EUR 01.08.25").unwrap();
        assert_eq!(rec.product_tipology, "500");
        assert_eq!(rec.price_eur, 500);
    }

    #[test]
    fn test_glued_euro_price_wins_over_numeric_preceding_token() {
        // "100" stays in the tipology; the glued token carries the price.
        let rec = parse_fallback("A1 B2 SHIRT 2.0 100 200€ EUR 01.08.25").unwrap();
        assert_eq!(rec.product_tipology, "SHIRT 2.0 100");
        assert_eq!(rec.price_eur, 200);
        assert_eq!(rec.currency, "EUR");
    }
}
