//! JSON manifest parser (velocity-plugin.json, fabric.mod.json)

use crate::manifest::traits::{ManifestParser, ParseError};
use crate::manifest::types::{ManifestRecord, ManifestValue};
use tracing::warn;

/// Parser for JSON manifests
///
/// Nested objects are flattened into dotted keys, so
/// `{"depends": {"minecraft": "~1.20"}}` yields `depends.minecraft`.
pub struct JsonManifestParser;

impl JsonManifestParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for JsonManifestParser {
    fn parse(&self, content: &str) -> Result<ManifestRecord, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_json::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set JSON language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse JSON content");
            ParseError::ParseFailed("Failed to parse JSON".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            warn!("JSON content contains syntax errors");
            return Err(ParseError::InvalidSyntax(
                "JSON content contains syntax errors".to_string(),
            ));
        }

        let mut record = ManifestRecord::new();

        // Find the root object
        if let Some(document) = root.child(0)
            && document.kind() == "object"
        {
            self.extract_object(document, None, content, &mut record);
        }

        Ok(record)
    }
}

impl JsonManifestParser {
    fn extract_object(
        &self,
        object_node: tree_sitter::Node,
        prefix: Option<&str>,
        content: &str,
        record: &mut ManifestRecord,
    ) {
        let mut cursor = object_node.walk();

        for child in object_node.children(&mut cursor) {
            if child.kind() != "pair" {
                continue;
            }

            let Some(key_node) = child.child_by_field_name("key") else {
                continue;
            };

            let Some(value_node) = child.child_by_field_name("value") else {
                continue;
            };

            let name = self.get_string_value(key_node, content);
            let key = match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name,
            };

            match value_node.kind() {
                "object" => self.extract_object(value_node, Some(key.as_str()), content, record),
                "array" => {
                    let items = self.extract_array(value_node, content);
                    record.insert(key, ManifestValue::List(items));
                }
                _ => {
                    if let Some(value) = self.get_scalar_value(value_node, content) {
                        record.insert(key, ManifestValue::Scalar(value));
                    }
                }
            }
        }
    }

    /// Collect the scalar items of an array, skipping nested objects and arrays
    fn extract_array(&self, array_node: tree_sitter::Node, content: &str) -> Vec<String> {
        let mut cursor = array_node.walk();
        array_node
            .named_children(&mut cursor)
            .filter_map(|item| self.get_scalar_value(item, content))
            .collect()
    }

    fn get_scalar_value(&self, node: tree_sitter::Node, content: &str) -> Option<String> {
        match node.kind() {
            "string" => Some(self.get_string_value(node, content)),
            "number" | "true" | "false" => Some(content[node.byte_range()].to_string()),
            _ => None,
        }
    }

    /// Get the string value from a string node, resolving escapes
    fn get_string_value(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = content[node.byte_range()].trim();
        serde_json::from_str::<String>(text).unwrap_or_else(|_| {
            text.trim_start_matches('"')
                .trim_end_matches('"')
                .to_string()
        })
    }
}
