//! Version metadata inference
//!
//! Selects the extraction rule for a recognized manifest, classifies the
//! declared version and resolves the compatible game versions.
//!
//! ```text
//! filename ──▶ ManifestKind ──▶ ManifestRule
//!                  │                 │
//!                  ▼                 ▼
//! text ──────▶ ManifestRecord ──▶ VersionRecord
//!                                    ▲
//!                         catalog ───┘
//! ```
//!
//! # Modules
//!
//! - [`rule`]: Per-manifest fields, loaders and game-version policies
//! - [`source`]: Archive file access trait and an in-memory implementation

pub mod rule;
pub mod source;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::InferConfig;
use crate::manifest::{ManifestKind, ParseError, parse_manifest};
use crate::version::catalog::CatalogEntry;
use crate::version::classifier::{VersionType, classify};

pub use rule::{Field, GameVersionPolicy, ManifestRule};
pub use source::{ManifestSource, MemorySource};

/// Project the uploaded package belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Inferred metadata for one uploaded version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// `"<project title> <version>"`
    pub name: String,
    pub version_number: String,
    pub version_type: VersionType,
    pub loaders: IndexSet<String>,
    /// `None` when the manifest has no notion of game versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_versions: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum InferError {
    #[error("Missing required field '{field}' in {manifest}")]
    MissingField {
        manifest: ManifestKind,
        field: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Applies manifest rules according to an [`InferConfig`]
#[derive(Debug, Clone, Default)]
pub struct Inferrer {
    config: InferConfig,
}

impl Inferrer {
    pub fn new(config: InferConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferConfig {
        &self.config
    }

    /// Returns the manifest kind for `file_name` if it is recognized and enabled
    pub fn detect(&self, file_name: &str) -> Option<ManifestKind> {
        ManifestKind::from_file_name(file_name)
            .filter(|kind| self.config.manifests.is_enabled(*kind))
    }

    /// Infer version metadata from one manifest file.
    ///
    /// Returns `Ok(None)` when the file name is not a recognized manifest.
    pub fn infer(
        &self,
        file_name: &str,
        content: &str,
        project: &Project,
        catalog: &[CatalogEntry],
    ) -> Result<Option<VersionRecord>, InferError> {
        let Some(kind) = self.detect(file_name) else {
            debug!("'{}' is not a recognized manifest", file_name);
            return Ok(None);
        };

        infer_kind(kind, content, project, catalog).map(Some)
    }

    /// Infer version metadata from the first recognized manifest in `source`.
    ///
    /// Manifests are probed in [`ManifestKind::ALL`] order. Returns `Ok(None)`
    /// when the package contains none of them.
    pub fn infer_from_source(
        &self,
        source: &dyn ManifestSource,
        project: &Project,
        catalog: &[CatalogEntry],
    ) -> Result<Option<VersionRecord>, InferError> {
        for kind in ManifestKind::ALL {
            if !self.config.manifests.is_enabled(kind) {
                continue;
            }

            if let Some(content) = source.read_manifest(kind.file_name()) {
                return infer_kind(kind, &content, project, catalog).map(Some);
            }
        }

        debug!("No recognized manifest found for '{}'", project.title);
        Ok(None)
    }
}

/// Infer version metadata from one manifest file with the default configuration
pub fn infer(
    file_name: &str,
    content: &str,
    project: &Project,
    catalog: &[CatalogEntry],
) -> Result<Option<VersionRecord>, InferError> {
    Inferrer::default().infer(file_name, content, project, catalog)
}

/// Infer version metadata from a package with the default configuration
pub fn infer_from_source(
    source: &dyn ManifestSource,
    project: &Project,
    catalog: &[CatalogEntry],
) -> Result<Option<VersionRecord>, InferError> {
    Inferrer::default().infer_from_source(source, project, catalog)
}

fn infer_kind(
    kind: ManifestKind,
    content: &str,
    project: &Project,
    catalog: &[CatalogEntry],
) -> Result<VersionRecord, InferError> {
    let rule = ManifestRule::for_kind(kind);
    let record = parse_manifest(kind.format(), content)?;

    let version = rule
        .version
        .lookup(&record)
        .and_then(|value| value.as_scalar())
        .ok_or_else(|| InferError::MissingField {
            manifest: kind,
            field: rule.version.name(),
        })?;

    let game_versions = rule.game_versions.resolve(&record, catalog);
    let version_type = classify(version);

    info!(
        "Inferred {} {} ({}) from {}",
        project.title, version, version_type, kind
    );

    Ok(VersionRecord {
        name: format!("{} {}", project.title, version),
        version_number: version.to_string(),
        version_type,
        loaders: rule.loaders.iter().map(|loader| loader.to_string()).collect(),
        game_versions,
    })
}
