//! YAML manifest parser (plugin.yml, paper-plugin.yml, bungee.yml)

use crate::manifest::traits::{ManifestParser, ParseError};
use crate::manifest::types::{ManifestRecord, ManifestValue};
use tracing::warn;

/// Parser for YAML manifests
///
/// Only the top-level mapping is read. Scalars and sequences of scalars
/// are kept; nested mappings (`commands:`, `permissions:`) are skipped.
pub struct YamlManifestParser;

impl YamlManifestParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlManifestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestParser for YamlManifestParser {
    fn parse(&self, content: &str) -> Result<ManifestRecord, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_yaml::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set YAML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse YAML content");
            ParseError::ParseFailed("Failed to parse YAML".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            warn!("YAML content contains syntax errors");
            return Err(ParseError::InvalidSyntax(
                "YAML content contains syntax errors".to_string(),
            ));
        }

        let mut record = ManifestRecord::new();
        if let Some(mapping) = self.find_top_level_mapping(root) {
            self.extract_pairs(mapping, content, &mut record);
        }

        Ok(record)
    }
}

impl YamlManifestParser {
    /// Walk stream -> document -> block_node -> block_mapping
    fn find_top_level_mapping<'a>(&self, root: tree_sitter::Node<'a>) -> Option<tree_sitter::Node<'a>> {
        let document = child_of_kind(root, "document")?;
        let block = child_of_kind(document, "block_node")?;
        child_of_kind(block, "block_mapping")
    }

    fn extract_pairs(
        &self,
        mapping: tree_sitter::Node,
        content: &str,
        record: &mut ManifestRecord,
    ) {
        let mut cursor = mapping.walk();
        for pair in mapping.children(&mut cursor) {
            if pair.kind() != "block_mapping_pair" {
                continue;
            }

            let (Some(key_node), Some(value_node)) = (
                pair.child_by_field_name("key"),
                pair.child_by_field_name("value"),
            ) else {
                continue;
            };

            let key = self.get_node_text(key_node, content);
            if let Some(value) = self.extract_value(value_node, content) {
                record.insert(key, value);
            }
        }
    }

    fn extract_value(&self, node: tree_sitter::Node, content: &str) -> Option<ManifestValue> {
        let inner = content_child(node)?;

        match inner.kind() {
            "plain_scalar" => Some(ManifestValue::Scalar(self.get_node_text(inner, content))),
            "single_quote_scalar" | "double_quote_scalar" => Some(ManifestValue::Scalar(
                self.get_quoted_value(inner, content),
            )),
            "flow_sequence" | "block_sequence" => {
                Some(ManifestValue::List(self.extract_sequence(inner, content)))
            }
            _ => None,
        }
    }

    /// Collect the scalar items of a `[a, b]` or `- a` sequence
    fn extract_sequence(&self, node: tree_sitter::Node, content: &str) -> Vec<String> {
        let mut items = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            let item = match child.kind() {
                "block_sequence_item" => child.named_child(0),
                "flow_node" => Some(child),
                _ => None,
            };

            if let Some(ManifestValue::Scalar(value)) =
                item.and_then(|item| self.extract_value(item, content))
            {
                items.push(value);
            }
        }

        items
    }

    /// Get the value of a quoted scalar, resolving escapes
    ///
    /// `''` is the only escape in single quotes. Double-quoted escapes
    /// (`\t`, `\"`, `\u00e9`) are resolved where they coincide with JSON's;
    /// otherwise the text between the quotes is kept.
    fn get_quoted_value(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = content[node.byte_range()].trim();
        if node.kind() == "single_quote_scalar" {
            return self.get_node_text(node, content).replace("''", "'");
        }
        serde_json::from_str::<String>(text).unwrap_or_else(|_| self.get_node_text(node, content))
    }

    /// Get text content of a node, removing quotes if present
    fn get_node_text(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = content[node.byte_range()].trim();
        let unquoted = if text.len() >= 2
            && ((text.starts_with('\'') && text.ends_with('\''))
                || (text.starts_with('"') && text.ends_with('"')))
        {
            &text[1..text.len() - 1]
        } else {
            text
        };
        unquoted.to_string()
    }
}

fn child_of_kind<'a>(node: tree_sitter::Node<'a>, kind: &str) -> Option<tree_sitter::Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// First named child of a flow/block node that carries its content,
/// skipping tags, anchors and comments
fn content_child(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| !matches!(child.kind(), "tag" | "anchor" | "comment"));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(value: &str) -> ManifestValue {
        ManifestValue::Scalar(value.to_string())
    }

    #[test]
    fn parse_extracts_top_level_scalars() {
        let content = r#"name: ExamplePlugin
version: 1.4.2
main: com.example.ExamplePlugin
api-version: '1.19'
"#;
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(record.get("name"), Some(&scalar("ExamplePlugin")));
        assert_eq!(record.get("version"), Some(&scalar("1.4.2")));
        assert_eq!(record.get("api-version"), Some(&scalar("1.19")));
        assert_eq!(
            record.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            vec!["name", "version", "main", "api-version"]
        );
    }

    #[test]
    fn parse_keeps_numeric_scalars_verbatim() {
        let content = "version: 2.0\napi-version: 1.20\n";
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(record.get_scalar("version"), Some("2.0"));
        assert_eq!(record.get_scalar("api-version"), Some("1.20"));
    }

    #[test]
    fn parse_strips_double_quotes() {
        let content = "version: \"1.0.0-SNAPSHOT\"\n";
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(record.get_scalar("version"), Some("1.0.0-SNAPSHOT"));
    }

    #[test]
    fn parse_resolves_quoted_escapes() {
        let content = r#"version: "1.0\t2"
description: "say \"hi\" \u00e9"
author: 'it''s me'
"#;
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(record.get_scalar("version"), Some("1.0\t2"));
        assert_eq!(record.get_scalar("description"), Some("say \"hi\" \u{e9}"));
        assert_eq!(record.get_scalar("author"), Some("it's me"));
    }

    #[test]
    fn parse_extracts_sequences() {
        let content = r#"version: 1.0.0
authors: [alice, bob]
depend:
  - Vault
  - LuckPerms
"#;
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(
            record.get("authors"),
            Some(&ManifestValue::List(vec![
                "alice".to_string(),
                "bob".to_string()
            ]))
        );
        assert_eq!(
            record.get("depend"),
            Some(&ManifestValue::List(vec![
                "Vault".to_string(),
                "LuckPerms".to_string()
            ]))
        );
    }

    #[test]
    fn parse_skips_nested_mappings() {
        let content = r#"name: ExamplePlugin
commands:
  example:
    version: 9.9.9
    usage: /example
version: 1.0.0
"#;
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(record.get("commands"), None);
        assert_eq!(record.get_scalar("version"), Some("1.0.0"));
    }

    #[test]
    fn parse_ignores_comments() {
        let content = r#"# Generated by gradle
name: ExamplePlugin # trailing comment
version: 1.0.0
"#;
        let record = YamlManifestParser::new().parse(content).unwrap();

        assert_eq!(record.get_scalar("name"), Some("ExamplePlugin"));
        assert_eq!(record.get_scalar("version"), Some("1.0.0"));
    }

    #[test]
    fn parse_returns_empty_record_for_empty_content() {
        let record = YamlManifestParser::new().parse("").unwrap();
        assert!(record.is_empty());
    }
}
