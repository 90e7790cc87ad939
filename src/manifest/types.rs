//! Common types for manifests

use indexmap::IndexMap;

/// Manifest files recognized inside a package archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// Bukkit and its forks (plugin.yml)
    PluginYml,
    /// Paper 1.19.3+ (paper-plugin.yml)
    PaperPluginYml,
    /// BungeeCord and Waterfall (bungee.yml)
    BungeeYml,
    /// Velocity (velocity-plugin.json)
    VelocityPluginJson,
    /// Fabric (fabric.mod.json)
    FabricModJson,
    /// Forge (META-INF/mods.toml)
    ForgeModsToml,
}

/// Text format a manifest is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
    Toml,
}

impl ManifestKind {
    /// All kinds, in the order an archive is probed for them
    pub const ALL: [ManifestKind; 6] = [
        ManifestKind::PluginYml,
        ManifestKind::PaperPluginYml,
        ManifestKind::BungeeYml,
        ManifestKind::VelocityPluginJson,
        ManifestKind::FabricModJson,
        ManifestKind::ForgeModsToml,
    ];

    /// Path of the manifest relative to the archive root
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::PluginYml => "plugin.yml",
            ManifestKind::PaperPluginYml => "paper-plugin.yml",
            ManifestKind::BungeeYml => "bungee.yml",
            ManifestKind::VelocityPluginJson => "velocity-plugin.json",
            ManifestKind::FabricModJson => "fabric.mod.json",
            ManifestKind::ForgeModsToml => "META-INF/mods.toml",
        }
    }

    pub fn format(&self) -> ManifestFormat {
        match self {
            ManifestKind::PluginYml | ManifestKind::PaperPluginYml | ManifestKind::BungeeYml => {
                ManifestFormat::Yaml
            }
            ManifestKind::VelocityPluginJson | ManifestKind::FabricModJson => ManifestFormat::Json,
            ManifestKind::ForgeModsToml => ManifestFormat::Toml,
        }
    }

    /// Detect the manifest kind from its path inside the archive
    pub fn from_file_name(path: &str) -> Option<Self> {
        let path = path.strip_prefix("./").unwrap_or(path);
        Self::ALL.into_iter().find(|kind| kind.file_name() == path)
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A manifest field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestValue {
    Scalar(String),
    List(Vec<String>),
}

impl ManifestValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ManifestValue::Scalar(value) => Some(value),
            ManifestValue::List(_) => None,
        }
    }

    /// The value as a list; a scalar becomes a one-element list
    pub fn to_list(&self) -> Vec<String> {
        match self {
            ManifestValue::Scalar(value) => vec![value.clone()],
            ManifestValue::List(values) => values.clone(),
        }
    }
}

/// Flat key-value view of a manifest
///
/// Nested tables and objects are flattened into dotted keys
/// (`depends.minecraft`), and entries of arrays of tables carry their index
/// (`dependencies.examplemod.1.modId`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestRecord {
    fields: IndexMap<String, ManifestValue>,
}

impl ManifestRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ManifestValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ManifestValue> {
        self.fields.get(key)
    }

    pub fn get_scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ManifestValue::as_scalar)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Find a field of the array-of-tables entry under `prefix` whose
    /// `match_key` equals `match_value`.
    ///
    /// With `dependencies.examplemod.1.modId = "minecraft"`,
    /// `find_in_entry("dependencies", "modId", "minecraft", "versionRange")`
    /// returns `dependencies.examplemod.1.versionRange`.
    pub fn find_in_entry(
        &self,
        prefix: &str,
        match_key: &str,
        match_value: &str,
        wanted_key: &str,
    ) -> Option<&ManifestValue> {
        let suffix = format!(".{match_key}");

        self.fields.iter().find_map(|(key, value)| {
            let entry = key
                .strip_prefix(prefix)
                .filter(|rest| rest.starts_with('.'))
                .and_then(|_| key.strip_suffix(&suffix))?;

            if value.as_scalar() != Some(match_value) {
                return None;
            }
            self.fields.get(&format!("{entry}.{wanted_key}"))
        })
    }
}

impl FromIterator<(String, ManifestValue)> for ManifestRecord {
    fn from_iter<T: IntoIterator<Item = (String, ManifestValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
