use crate::ast::{BlockNode, Diagnostic};
use serde::{Deserialize, Serialize};

/// Top-level JSON file written by `sync --json`.
///
/// This wraps the parsed node sequence with metadata that makes debugging
/// easier (schema versioning, source info, diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFile {
    /// Schema version for this JSON payload.
    pub schema_version: u32,

    pub parser: ParserInfo,

    pub source: SourceInfo,

    /// Parser diagnostics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    pub nodes: Vec<BlockNode>,
}

/// Identifies the program that produced the node sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserInfo {
    pub name: String,
    pub version: String,
}

impl Default for ParserInfo {
    fn default() -> Self {
        Self {
            name: crate::ast::PARSER_NAME.to_string(),
            version: crate::ast::PARSER_VERSION.to_string(),
        }
    }
}

/// Information about the input buffer the nodes point into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// If available, the path of the markdown file used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Length of the input in bytes. Every segment stop is `<=` this.
    pub byte_len: usize,
}
