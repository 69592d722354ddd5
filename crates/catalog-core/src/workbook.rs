use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use umya_spreadsheet::Spreadsheet;

use crate::error::CatalogError;
use crate::pricing::{f64_to_decimal, PricedLine, Translations, DEFAULT_MARGIN, OUTPUT_HEADER};

pub const SETTINGS_SHEET: &str = "Настройки";
pub const TRANSLATOR_SHEET: &str = "Переводчик";
pub const WORK_SHEET: &str = "Рабочий";

/// Values from the settings sheet, column B.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSettings {
    /// B1: euro rate used when the online lookup fails.
    pub exchange_rate: Decimal,
    /// B2: margin fraction; blank means 3%.
    pub margin: Decimal,
    /// B4: position number of the first item.
    pub start_position: u64,
    /// B5: unit of measure written on every line.
    pub measure_unit: String,
}

#[derive(Debug, Clone)]
pub struct WorkbookData {
    pub settings: WorkbookSettings,
    pub translations: Translations,
}

/// Read settings and the translation table from an xlsx workbook.
pub fn load_workbook(bytes: &[u8]) -> Result<WorkbookData, CatalogError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| CatalogError::Workbook(format!("failed to open xlsx: {e}")))?;

    let settings_range = workbook.worksheet_range(SETTINGS_SHEET).map_err(|e| {
        CatalogError::Workbook(format!("sheet '{SETTINGS_SHEET}' not found: {e}"))
    })?;
    let translator_range = workbook.worksheet_range(TRANSLATOR_SHEET).map_err(|e| {
        CatalogError::Workbook(format!("sheet '{TRANSLATOR_SHEET}' not found: {e}"))
    })?;

    Ok(WorkbookData {
        settings: read_settings(&settings_range)?,
        translations: read_translations(&translator_range),
    })
}

pub fn read_settings(sheet: &Range<Data>) -> Result<WorkbookSettings, CatalogError> {
    let exchange_rate = required_decimal(sheet, 0, "B1 (exchange rate)")?;

    let margin = match sheet.get_value((1, 1)) {
        None | Some(Data::Empty) => DEFAULT_MARGIN,
        Some(_) => required_decimal(sheet, 1, "B2 (margin)")?,
    };

    let start_position = required_decimal(sheet, 3, "B4 (start position)")?;
    if start_position.is_sign_negative() || !start_position.fract().is_zero() {
        return Err(CatalogError::Workbook(format!(
            "B4 (start position) must be a non-negative whole number, got {start_position}"
        )));
    }
    let start_position = start_position
        .to_u64()
        .ok_or_else(|| CatalogError::Workbook("B4 (start position) is too large".into()))?;

    let measure_unit = sheet
        .get_value((4, 1))
        .and_then(cell_as_string)
        .ok_or_else(|| CatalogError::Workbook("B5 (measure unit) is empty".into()))?;

    Ok(WorkbookSettings {
        exchange_rate,
        margin,
        start_position,
        measure_unit,
    })
}

/// Column A vendor name, column B local name, starting on row 2.
///
/// Rows missing either name are ignored.
pub fn read_translations(sheet: &Range<Data>) -> Translations {
    let last_row = match sheet.end() {
        Some((row, _)) => row,
        None => return Translations::new(),
    };

    (1..=last_row)
        .filter_map(|row| {
            let vendor = sheet.get_value((row, 0)).and_then(cell_as_string)?;
            let local = sheet.get_value((row, 1)).and_then(cell_as_string)?;
            Some((vendor, local))
        })
        .collect()
}

/// Write priced lines into the work sheet of an existing xlsx and return
/// the updated file. Every other sheet is carried over unchanged.
pub fn update_workbook(bytes: &[u8], lines: &[PricedLine]) -> Result<Vec<u8>, CatalogError> {
    let mut book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
        .map_err(|e| CatalogError::Workbook(format!("failed to open xlsx: {e}")))?;

    write_work_sheet(&mut book, lines)?;

    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| CatalogError::Workbook(format!("failed to save xlsx: {e}")))?;
    Ok(out.into_inner())
}

/// Clear the work sheet, then put the header in A1 and one CSV line per
/// row from A2 down.
pub fn write_work_sheet(book: &mut Spreadsheet, lines: &[PricedLine]) -> Result<(), CatalogError> {
    let sheet = book
        .get_sheet_by_name_mut(WORK_SHEET)
        .ok_or_else(|| CatalogError::Workbook(format!("sheet '{WORK_SHEET}' not found")))?;

    let highest_row = sheet.get_highest_row();
    if highest_row > 0 {
        sheet.remove_row(&1, &highest_row);
    }

    sheet.get_cell_mut((1u32, 1u32)).set_value_string(OUTPUT_HEADER);
    for (row, line) in (2u32..).zip(lines) {
        sheet.get_cell_mut((1u32, row)).set_value_string(line.to_string());
    }

    Ok(())
}

fn required_decimal(sheet: &Range<Data>, row: u32, label: &str) -> Result<Decimal, CatalogError> {
    let cell = sheet.get_value((row, 1));
    cell_as_decimal(cell).ok_or_else(|| {
        let shown = cell.map(|c| format!("{c}")).unwrap_or_default();
        CatalogError::Workbook(format!("{label} is not a number: '{shown}'"))
    })
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

/// Numbers, or text holding a number (decimal comma accepted).
fn cell_as_decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell? {
        Data::Float(f) => f64_to_decimal(*f),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}
