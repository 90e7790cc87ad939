//! Catalog of known game versions supplied by the caller

use serde::{Deserialize, Serialize};

/// Classification of a catalog version as published by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVersionType {
    Release,
    Snapshot,
    Alpha,
    Beta,
    #[serde(other)]
    Other,
}

/// One known game version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub version: String,
    pub version_type: CatalogVersionType,
}

impl CatalogEntry {
    pub fn new(version: impl Into<String>, version_type: CatalogVersionType) -> Self {
        Self {
            version: version.into(),
            version_type,
        }
    }

    /// Shorthand for a release entry
    pub fn release(version: impl Into<String>) -> Self {
        Self::new(version, CatalogVersionType::Release)
    }

    pub fn is_release(&self) -> bool {
        self.version_type == CatalogVersionType::Release
    }
}

/// Version strings of the release entries, in catalog order
pub fn release_versions(catalog: &[CatalogEntry]) -> Vec<String> {
    catalog
        .iter()
        .filter(|entry| entry.is_release())
        .map(|entry| entry.version.clone())
        .collect()
}
