//! Segment-addressed block model.
//!
//! This module defines the **contract** between:
//! 1) parsing a markdown buffer -> flat sequence of top-level `BlockNode`s, and
//! 2) the rewrites that walk that sequence and re-emit byte windows.
//!
//! Design goals:
//! - Nodes never copy source text; they hold `Segment`s into the raw buffer.
//! - Top-level nodes are in document order with non-overlapping segments.
//! - A stable JSON representation for on-disk inspection.

mod diagnostic;
mod envelope;
mod nodes;
mod span;

pub use diagnostic::*;
pub use envelope::*;
pub use nodes::*;
pub use span::*;

/// JSON schema version for the node envelope.
///
/// Bump this when making non-backwards-compatible changes to the JSON structure.
pub const SCHEMA_VERSION: u32 = 1;

/// The parser name stored in the JSON envelope.
pub const PARSER_NAME: &str = "guide2md";

/// The parser version stored in the JSON envelope.
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");
