//! Access to files inside an uploaded package

#[cfg(test)]
use mockall::automock;

use indexmap::IndexMap;

/// Trait for reading decoded files out of a package archive
///
/// Archive decoding itself lives with the caller; implementations only
/// answer whether a path exists and what its text is.
#[cfg_attr(test, automock)]
pub trait ManifestSource {
    /// Returns the decoded text of the file at `path`, or `None` if absent
    fn read_manifest(&self, path: &str) -> Option<String>;
}

/// In-memory [`ManifestSource`] keyed by archive path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    files: IndexMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, returning the source for chaining
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl ManifestSource for MemorySource {
    fn read_manifest(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for MemorySource {
    fn from_iter<T: IntoIterator<Item = (P, C)>>(iter: T) -> Self {
        let mut source = Self::new();
        for (path, content) in iter {
            source.insert(path, content);
        }
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_returns_inserted_files() {
        let source = MemorySource::new()
            .with_file("plugin.yml", "version: 1.0.0")
            .with_file("META-INF/mods.toml", "modLoader = \"javafml\"");

        assert_eq!(
            source.read_manifest("plugin.yml"),
            Some("version: 1.0.0".to_string())
        );
        assert_eq!(
            source.read_manifest("META-INF/mods.toml"),
            Some("modLoader = \"javafml\"".to_string())
        );
        assert_eq!(source.read_manifest("bungee.yml"), None);
    }

    #[test]
    fn memory_source_collects_from_pairs() {
        let source: MemorySource = [("bungee.yml", "version: 2.0")].into_iter().collect();

        assert_eq!(
            source.read_manifest("bungee.yml"),
            Some("version: 2.0".to_string())
        );
    }
}
