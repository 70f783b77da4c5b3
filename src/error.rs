use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The buffer could not be turned into a well-formed node sequence.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("block {index} overlaps the block before it")]
    Overlap { index: usize },
}

/// Failures of a rewrite pass. All of them abort the pass.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("failed to parse document: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to write section {}: {source}", path.display())]
    Section {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// Never returned; logged when a node that should carry a text segment has none.
    #[error("{kind} at byte {offset} has no text segment")]
    MalformedSegment { kind: &'static str, offset: usize },
}
