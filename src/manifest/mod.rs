//! Manifest layer
//! - traits.rs: ManifestParser trait definition
//! - types.rs: Common types (ManifestKind, ManifestRecord)
//! - yaml.rs: plugin.yml / paper-plugin.yml / bungee.yml parser
//! - json.rs: velocity-plugin.json / fabric.mod.json parser
//! - toml.rs: META-INF/mods.toml parser

pub mod json;
pub mod toml;
pub mod traits;
pub mod types;
pub mod yaml;

pub use json::JsonManifestParser;
pub use toml::TomlManifestParser;
pub use traits::{ManifestParser, ParseError};
pub use types::{ManifestFormat, ManifestKind, ManifestRecord, ManifestValue};
pub use yaml::YamlManifestParser;

/// Parse manifest text with the parser for its format
pub fn parse_manifest(format: ManifestFormat, content: &str) -> Result<ManifestRecord, ParseError> {
    match format {
        ManifestFormat::Yaml => YamlManifestParser::new().parse(content),
        ManifestFormat::Json => JsonManifestParser::new().parse(content),
        ManifestFormat::Toml => TomlManifestParser::new().parse(content),
    }
}
