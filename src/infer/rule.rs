//! Per-manifest extraction rules
//!
//! Each [`ManifestKind`] maps to one [`ManifestRule`]: where the version is
//! declared, which loaders the manifest implies, and how compatible game
//! versions are derived.

use tracing::debug;

use crate::manifest::{ManifestKind, ManifestRecord, ManifestValue};
use crate::version::catalog::{CatalogEntry, release_versions};
use crate::version::interval::match_interval;
use crate::version::range::match_semver;

/// Location of a value inside a manifest record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// A top-level or flattened key (`version`, `depends.minecraft`)
    Key(&'static str),
    /// `versionRange` of the `[[dependencies.<mod>]]` entry whose `modId`
    /// equals the given id
    DependencyRange(&'static str),
}

impl Field {
    pub fn lookup<'a>(&self, record: &'a ManifestRecord) -> Option<&'a ManifestValue> {
        match self {
            Field::Key(key) => record.get(key),
            Field::DependencyRange(mod_id) => {
                record.find_in_entry("dependencies", "modId", mod_id, "versionRange")
            }
        }
    }

    /// Human-readable name used in errors
    pub fn name(&self) -> String {
        match self {
            Field::Key(key) => (*key).to_string(),
            Field::DependencyRange(mod_id) => format!("dependencies[modId={mod_id}].versionRange"),
        }
    }
}

/// How a manifest declares the game versions it supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVersionPolicy {
    /// No game-version concept; the record omits `game_versions`
    None,
    /// Release versions starting with the field's text (`api-version: 1.19`)
    ReleasePrefix(Field),
    /// Release versions inside an interval-notation range (`[1.20,1.21)`)
    IntervalRange(Field),
    /// Release versions matching one or more semver ranges (`>=1.19.2`)
    SemverRange(Field),
}

impl GameVersionPolicy {
    /// Resolve the compatible catalog versions, preserving catalog order.
    ///
    /// Returns `None` for [`GameVersionPolicy::None`]. A missing field
    /// declares no constraint and resolves to an empty list.
    pub fn resolve(&self, record: &ManifestRecord, catalog: &[CatalogEntry]) -> Option<Vec<String>> {
        let versions = match self {
            GameVersionPolicy::None => return None,
            GameVersionPolicy::ReleasePrefix(field) => {
                let Some(prefix) = field.lookup(record).and_then(ManifestValue::as_scalar) else {
                    debug!("No {} declared, no game versions inferred", field.name());
                    return Some(Vec::new());
                };
                catalog
                    .iter()
                    .filter(|entry| entry.is_release() && entry.version.starts_with(prefix))
                    .map(|entry| entry.version.clone())
                    .collect()
            }
            GameVersionPolicy::IntervalRange(field) => {
                let range = field
                    .lookup(record)
                    .and_then(ManifestValue::as_scalar)
                    .unwrap_or_default();
                match_interval(range, &release_versions(catalog))
            }
            GameVersionPolicy::SemverRange(field) => {
                let ranges: Vec<String> = field
                    .lookup(record)
                    .map(ManifestValue::to_list)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|range| !range.is_empty())
                    .collect();
                match_semver(&ranges, &release_versions(catalog))
            }
        };

        Some(versions)
    }
}

/// Extraction rule for one manifest kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestRule {
    /// Where the declared version lives
    pub version: Field,
    /// Loaders implied by the manifest; empty when unknown
    pub loaders: &'static [&'static str],
    pub game_versions: GameVersionPolicy,
}

impl ManifestRule {
    pub fn for_kind(kind: ManifestKind) -> Self {
        match kind {
            // Any fork of Bukkit may load it
            ManifestKind::PluginYml => ManifestRule {
                version: Field::Key("version"),
                loaders: &[],
                game_versions: GameVersionPolicy::ReleasePrefix(Field::Key("api-version")),
            },
            ManifestKind::PaperPluginYml => ManifestRule {
                version: Field::Key("version"),
                loaders: &["paper"],
                game_versions: GameVersionPolicy::ReleasePrefix(Field::Key("api-version")),
            },
            ManifestKind::BungeeYml => ManifestRule {
                version: Field::Key("version"),
                loaders: &["bungeecord"],
                game_versions: GameVersionPolicy::None,
            },
            ManifestKind::VelocityPluginJson => ManifestRule {
                version: Field::Key("version"),
                loaders: &["velocity"],
                game_versions: GameVersionPolicy::None,
            },
            ManifestKind::FabricModJson => ManifestRule {
                version: Field::Key("version"),
                loaders: &["fabric"],
                game_versions: GameVersionPolicy::SemverRange(Field::Key("depends.minecraft")),
            },
            ManifestKind::ForgeModsToml => ManifestRule {
                version: Field::Key("mods.0.version"),
                loaders: &["forge"],
                game_versions: GameVersionPolicy::IntervalRange(Field::DependencyRange(
                    "minecraft",
                )),
            },
        }
    }
}
