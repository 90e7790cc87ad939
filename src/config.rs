use serde::Deserialize;
use std::path::PathBuf;

use crate::manifest::ManifestKind;

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name of the log file inside the data directory
pub const LOG_FILE_NAME: &str = "version-infer.log";

/// Inference configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InferConfig {
    pub manifests: ManifestsConfig,
    pub logging: LoggingConfig,
}

impl InferConfig {
    /// Parse a configuration from JSON, using defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Manifest-specific configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestsConfig {
    pub plugin_yml: ManifestConfig,
    pub paper_plugin_yml: ManifestConfig,
    pub bungee_yml: ManifestConfig,
    pub velocity_plugin_json: ManifestConfig,
    pub fabric_mod_json: ManifestConfig,
    pub forge_mods_toml: ManifestConfig,
}

impl ManifestsConfig {
    pub fn get(&self, kind: ManifestKind) -> &ManifestConfig {
        match kind {
            ManifestKind::PluginYml => &self.plugin_yml,
            ManifestKind::PaperPluginYml => &self.paper_plugin_yml,
            ManifestKind::BungeeYml => &self.bungee_yml,
            ManifestKind::VelocityPluginJson => &self.velocity_plugin_json,
            ManifestKind::FabricModJson => &self.fabric_mod_json,
            ManifestKind::ForgeModsToml => &self.forge_mods_toml,
        }
    }

    pub fn is_enabled(&self, kind: ManifestKind) -> bool {
        self.get(kind).enabled
    }
}

/// Individual manifest configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    pub enabled: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json: bool,
    /// Directory for the log file; defaults to [`data_dir`]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            directory: None,
        }
    }
}

/// Returns the path to the data directory for version-infer.
/// Uses $XDG_DATA_HOME/version-infer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-infer,
/// or ./version-infer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-infer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infer_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<InferConfig>(json!({
            "logging": {
                "level": "debug"
            }
        }))
        .unwrap();

        assert_eq!(result.logging.level, "debug");
        assert!(!result.logging.json);
        assert_eq!(result.manifests, ManifestsConfig::default());
    }

    #[test]
    fn infer_config_from_full_object_parses_all_fields() {
        let result = InferConfig::from_json(
            r#"{
                "manifests": {
                    "pluginYml": { "enabled": false },
                    "paperPluginYml": { "enabled": true },
                    "bungeeYml": { "enabled": false },
                    "velocityPluginJson": { "enabled": true },
                    "fabricModJson": { "enabled": false },
                    "forgeModsToml": { "enabled": true }
                },
                "logging": {
                    "level": "version_infer=trace",
                    "json": true,
                    "directory": "/var/log/infer"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            result,
            InferConfig {
                manifests: ManifestsConfig {
                    plugin_yml: ManifestConfig { enabled: false },
                    paper_plugin_yml: ManifestConfig { enabled: true },
                    bungee_yml: ManifestConfig { enabled: false },
                    velocity_plugin_json: ManifestConfig { enabled: true },
                    fabric_mod_json: ManifestConfig { enabled: false },
                    forge_mods_toml: ManifestConfig { enabled: true },
                },
                logging: LoggingConfig {
                    level: "version_infer=trace".to_string(),
                    json: true,
                    directory: Some(PathBuf::from("/var/log/infer")),
                }
            }
        );
    }

    #[test]
    fn manifests_config_is_enabled_maps_each_kind() {
        let config = ManifestsConfig {
            bungee_yml: ManifestConfig { enabled: false },
            ..Default::default()
        };

        for kind in ManifestKind::ALL {
            assert_eq!(
                config.is_enabled(kind),
                kind != ManifestKind::BungeeYml,
                "{kind}"
            );
        }
    }

    #[test]
    fn log_path_is_log_file_inside_data_dir() {
        let path = log_path();

        assert!(path.ends_with("version-infer/version-infer.log"));
        assert_eq!(path, data_dir().join(LOG_FILE_NAME));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/version-infer"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/version-infer"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-infer"));
    }
}
