//! Release metadata inference for uploaded plugin and mod packages
//!
//! Reads one well-known manifest (e.g. `plugin.yml`, `fabric.mod.json`) and
//! produces a [`VersionRecord`]: version number, maturity, loaders and the
//! game versions the package is compatible with.
//!
//! # Modules
//!
//! - [`manifest`]: Manifest kinds and tree-sitter based key-value parsers
//! - [`version`]: Classification and range matching against a version catalog
//! - [`infer`]: Per-manifest extraction rules and the dispatcher
//! - [`config`]: Configuration (enabled manifests, logging)
//! - [`logging`]: `tracing` subscriber setup

pub mod config;
pub mod infer;
pub mod logging;
pub mod manifest;
pub mod version;

pub use infer::{
    InferError, Inferrer, ManifestSource, MemorySource, Project, VersionRecord, infer,
    infer_from_source,
};
pub use version::catalog::{CatalogEntry, CatalogVersionType};
pub use version::classifier::{VersionType, classify};
pub use version::interval::{match_interval, translate_interval};
pub use version::range::match_semver;
