//! Catalog of deployable entities discovered from the source tree.
//!
//! Discovery itself happens elsewhere; this module turns the discovered
//! (area, theme, locale) triples into an [`EntityUniverse`] and loads them
//! from a JSON catalog file.

mod types;

pub use types::{AreaThemeMap, CatalogEntry, EntityKind, EntityUniverse, DEFAULT_LOCALE};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(String),
}

/// Entries accepted in a catalog file: either `{"area", "theme", "locale"}`
/// records or bare `[area, theme, locale]` triples.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Triple(String, String, String),
    Record(CatalogEntry),
}

impl From<RawEntry> for CatalogEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Triple(area, theme, locale) => CatalogEntry::new(area, theme, locale),
            RawEntry::Record(entry) => entry,
        }
    }
}

/// Parse catalog entries from a JSON string.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let raw: Vec<RawEntry> =
        serde_json::from_str(json).map_err(|e| CatalogError::ParseError(e.to_string()))?;
    Ok(raw.into_iter().map(CatalogEntry::from).collect())
}

/// Load catalog entries from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    let entries = parse_catalog(&json)?;
    debug!("Loaded {} catalog entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Supplies the discovered catalog entries.
pub trait CatalogSource: Send + Sync {
    fn entries(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}

/// Catalog read from a JSON file on each call.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        load_catalog(&self.path)
    }
}

impl CatalogSource for Vec<CatalogEntry> {
    fn entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_catalog_records_and_triples() {
        let json = r#"[
            {"area": "frontend", "theme": "Magento/luma", "locale": "fr_FR"},
            ["adminhtml", "Magento/backend", ""],
            {"area": "base"}
        ]"#;
        let entries = parse_catalog(json).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], CatalogEntry::new("frontend", "Magento/luma", "fr_FR"));
        assert_eq!(entries[1], CatalogEntry::new("adminhtml", "Magento/backend", ""));
        assert_eq!(entries[2], CatalogEntry::new("base", "", ""));
    }

    #[test]
    fn test_parse_catalog_invalid() {
        let result = parse_catalog(r#"{"area": "frontend"}"#);
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_load_catalog_file_not_found() {
        let result = load_catalog(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::FileNotFound(_))));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"[["frontend", "Magento/blank", "en_US"]]"#).unwrap();

        let entries = FileCatalog::new(temp_file.path()).entries().unwrap();
        let universe = EntityUniverse::from_entries(&entries);
        assert_eq!(universe.areas, vec!["frontend"]);
    }
}
