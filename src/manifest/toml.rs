//! TOML manifest parser (META-INF/mods.toml)

use std::collections::HashMap;

use crate::manifest::traits::{ManifestParser, ParseError};
use crate::manifest::types::{ManifestRecord, ManifestValue};
use tracing::warn;

/// Parser for TOML manifests
///
/// Top-level pairs keep their key, `[table]` pairs become `table.key` and
/// `[[array]]` entries become `array.<index>.key`, counting from 0 per array.
pub struct TomlManifestParser;

impl TomlManifestParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TomlManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for TomlManifestParser {
    fn parse(&self, content: &str) -> Result<ManifestRecord, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_toml_ng::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set TOML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse TOML content");
            ParseError::ParseFailed("Failed to parse TOML".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            warn!("TOML content contains syntax errors");
            return Err(ParseError::InvalidSyntax(
                "TOML content contains syntax errors".to_string(),
            ));
        }

        let mut record = ManifestRecord::new();
        let mut array_counts: HashMap<String, usize> = HashMap::new();
        let mut cursor = root.walk();

        for child in root.children(&mut cursor) {
            match child.kind() {
                "pair" => self.extract_pair(child, None, content, &mut record),
                "table" => {
                    let Some(name) = self.get_table_name(child, content) else {
                        continue;
                    };
                    self.extract_table(child, &name, content, &mut record);
                }
                "table_array_element" => {
                    let Some(name) = self.get_table_name(child, content) else {
                        continue;
                    };
                    let index = array_counts.entry(name.clone()).or_insert(0);
                    let prefix = format!("{name}.{index}");
                    *index += 1;
                    self.extract_table(child, &prefix, content, &mut record);
                }
                _ => {}
            }
        }

        Ok(record)
    }
}

impl TomlManifestParser {
    /// Find the header key of a `[table]` or `[[array]]` node
    fn get_table_name(&self, table_node: tree_sitter::Node, content: &str) -> Option<String> {
        let mut cursor = table_node.walk();
        let key = table_node
            .children(&mut cursor)
            .find(|child| is_key(child.kind()))?;
        Some(self.get_key_text(key, content))
    }

    /// Process all pairs (key = value) in a table
    fn extract_table(
        &self,
        table_node: tree_sitter::Node,
        prefix: &str,
        content: &str,
        record: &mut ManifestRecord,
    ) {
        let mut cursor = table_node.walk();
        for child in table_node.children(&mut cursor) {
            if child.kind() == "pair" {
                self.extract_pair(child, Some(prefix), content, record);
            }
        }
    }

    fn extract_pair(
        &self,
        pair_node: tree_sitter::Node,
        prefix: Option<&str>,
        content: &str,
        record: &mut ManifestRecord,
    ) {
        let mut cursor = pair_node.walk();
        let mut key: Option<String> = None;
        let mut value: Option<ManifestValue> = None;

        for child in pair_node.children(&mut cursor) {
            match child.kind() {
                kind if is_key(kind) => key = Some(self.get_key_text(child, content)),
                "array" => {
                    let mut item_cursor = child.walk();
                    let items = child
                        .named_children(&mut item_cursor)
                        .filter_map(|item| self.get_scalar_value(item, content))
                        .collect();
                    value = Some(ManifestValue::List(items));
                }
                _ => {
                    if let Some(scalar) = self.get_scalar_value(child, content) {
                        value = Some(ManifestValue::Scalar(scalar));
                    }
                }
            }
        }

        let (Some(key), Some(value)) = (key, value) else {
            return;
        };

        let key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key,
        };
        record.insert(key, value);
    }

    fn get_scalar_value(&self, node: tree_sitter::Node, content: &str) -> Option<String> {
        let text = content[node.byte_range()].trim();
        match node.kind() {
            "string" => Some(unquote(text).to_string()),
            "integer" | "float" | "boolean" => Some(text.to_string()),
            _ => None,
        }
    }

    /// Key text with quoted and dotted parts normalized (`"a" . b` -> `a.b`)
    fn get_key_text(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        if node.kind() == "quoted_key" {
            return unquote(text.trim()).to_string();
        }
        text.split('.')
            .map(|part| unquote(part.trim()))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn is_key(kind: &str) -> bool {
    matches!(kind, "bare_key" | "quoted_key" | "dotted_key")
}

/// Strip TOML string delimiters: `"""`, `'''`, `"` or `'`
fn unquote(text: &str) -> &str {
    for delimiter in ["\"\"\"", "'''", "\"", "'"] {
        if text.len() >= 2 * delimiter.len()
            && text.starts_with(delimiter)
            && text.ends_with(delimiter)
        {
            return &text[delimiter.len()..text.len() - delimiter.len()];
        }
    }
    text
}
