use catalog_core::model::{ParsedCatalog, ProductRecord};

pub fn print_records(parsed: &ParsedCatalog) {
    print!("{}", format_records(&parsed.records));

    if !parsed.unparsed.is_empty() {
        println!("\n  Unparsed lines ({}):", parsed.unparsed.len());
        for line in &parsed.unparsed {
            println!("    {}  ({})", line.line_text, line.reason);
        }
    }
}

fn format_records(records: &[ProductRecord]) -> String {
    let headers = ["#", "Article", "Fabric", "Tipology", "Price €", "Cur", "Date"];
    let rows: Vec<[String; 7]> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                r.article.clone(),
                r.fabric_code.clone(),
                r.product_tipology.clone(),
                r.price_eur.to_string(),
                r.currency.clone(),
                r.date.clone(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    out.push_str(&format!("  {}\n", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))));
    for row in rows {
        push_row(&mut out, row.into_iter(), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str("  ");
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// One-line summaries for the first `limit` records.
pub fn preview(records: &[ProductRecord], limit: usize) -> Vec<String> {
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(article: &str, tipology: &str, price: u64) -> ProductRecord {
        ProductRecord {
            article: article.into(),
            fabric_code: "F1".into(),
            product_tipology: tipology.into(),
            price_eur: price,
            currency: "EUR".into(),
            date: "01.08.25".into(),
        }
    }

    #[test]
    fn test_format_records_aligns_columns() {
        let out = format_records(&[rec("E7T2", "PLAIN WEAVE SHIRT", 1850), rec("A1", "TIE", 90)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  #  Article  Fabric  Tipology"));
        let price_col = lines[0].find("Price").unwrap();
        assert_eq!(&lines[2][price_col..price_col + 4], "1850");
        assert_eq!(&lines[3][price_col..price_col + 2], "90");
    }

    #[test]
    fn test_preview_limits() {
        let records = vec![rec("A1", "TIE", 1), rec("A2", "BELT", 2), rec("A3", "HAT", 3)];
        let lines = preview(&records, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2. ARTICLE: A2, FABRIC: F1, TIPOLOGY: BELT, PRICE: 2 €");
    }
}
