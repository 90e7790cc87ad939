//! Manifest parser trait definition

use crate::manifest::types::ManifestRecord;

/// Trait for turning manifest text into a flat key-value record
pub trait ManifestParser {
    /// Parse the content and extract its fields
    fn parse(&self, content: &str) -> Result<ManifestRecord, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse the file structure
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    /// Invalid syntax in the file
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}
