//! Game version catalog fixtures

use serde_json::json;

use version_infer::CatalogEntry;

/// A catalog shaped like the platform's, newest first
pub fn create_test_catalog() -> Vec<CatalogEntry> {
    serde_json::from_value(json!([
        { "version": "1.21", "version_type": "release" },
        { "version": "24w14a", "version_type": "snapshot" },
        { "version": "1.20.4", "version_type": "release" },
        { "version": "1.20.2", "version_type": "release" },
        { "version": "1.20.1", "version_type": "release" },
        { "version": "1.20.1-rc1", "version_type": "snapshot" },
        { "version": "1.20", "version_type": "release" },
        { "version": "1.20-pre7", "version_type": "snapshot" },
        { "version": "1.19.4", "version_type": "release" },
        { "version": "1.19.3", "version_type": "release" },
        { "version": "1.19.2", "version_type": "release" },
        { "version": "1.19", "version_type": "release" },
        { "version": "1.18.2", "version_type": "release" },
        { "version": "1.16.5", "version_type": "release" },
        { "version": "1.16", "version_type": "release" },
        { "version": "b1.7.3", "version_type": "old_beta" }
    ]))
    .unwrap()
}

/// Owned version strings for assertions and range inputs
pub fn versions(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
