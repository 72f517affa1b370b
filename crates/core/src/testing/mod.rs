//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use static_deploy_core::testing::{fixtures, MockDeployer};
//!
//! let deployer = MockDeployer::new();
//! let universe = EntityUniverse::from_entries(&fixtures::sample_catalog());
//! ```

mod mock_deployer;

pub use mock_deployer::MockDeployer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::CatalogEntry;

    /// Frontend with two themes, adminhtml without any theme, two locales.
    pub fn sample_catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("frontend", "blank", "en_US"),
            CatalogEntry::new("frontend", "luma", "fr_FR"),
            CatalogEntry::new("adminhtml", "", ""),
        ]
    }

    /// Catalog with both areas carrying themes.
    pub fn full_catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("frontend", "Magento/blank", "en_US"),
            CatalogEntry::new("frontend", "Magento/luma", "fr_FR"),
            CatalogEntry::new("adminhtml", "Magento/backend", "de_DE"),
        ]
    }

    /// Catalog as a JSON document.
    pub fn catalog_json(entries: &[CatalogEntry]) -> String {
        serde_json::to_string(entries).unwrap_or_default()
    }
}
