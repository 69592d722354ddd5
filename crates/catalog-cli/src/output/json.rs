use catalog_core::error::CatalogError;
use catalog_core::model::ParsedCatalog;
use std::path::Path;

pub fn print(parsed: &ParsedCatalog) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(parsed)?;
    println!("{json}");
    Ok(())
}

pub fn write(parsed: &ParsedCatalog, path: &Path) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(parsed)?;
    std::fs::write(path, json)?;
    Ok(())
}
