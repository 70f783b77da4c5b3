use crate::ast::Segment;
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic emitted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Info,
}

/// A soft problem found while parsing. Degenerate blocks are kept in the
/// node sequence and reported here instead of failing the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,

    /// A stable identifier like `markdown.code_block.empty`.
    pub code: String,

    /// Human readable message.
    pub message: String,

    /// The source span this diagnostic refers to, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Segment>,
}

impl Diagnostic {
    pub fn warning(code: &str, message: impl Into<String>, span: Segment) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.into(),
            span: Some(span),
        }
    }
}
