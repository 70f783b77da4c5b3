pub mod ast;
pub mod error;
pub mod headings;
pub mod parse;
pub mod render;
pub mod source;
pub mod split;

pub use error::{ParseError, RewriteError};

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Local copy of the source document.
pub const DEFAULT_CACHE_PATH: &str = "CppCoreGuidelines.md";

/// Directory that receives one file per section.
pub const DEFAULT_SECTIONS_DIR: &str = "sections/en";

/// The annotated single-file variant.
pub const DEFAULT_ANNOTATED_PATH: &str = "CppCoreGuidelines.annotated.md";

/// Everything a `sync` run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// URL downloaded when `cache_path` does not exist yet.
    pub source_url: String,

    pub cache_path: PathBuf,
    pub sections_dir: PathBuf,
    pub annotated_path: PathBuf,

    /// If set, the parsed node sequence is dumped here as JSON.
    pub json_path: Option<PathBuf>,

    pub rewrite: render::RewriteOptions,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            source_url: source::DEFAULT_SOURCE_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            sections_dir: PathBuf::from(DEFAULT_SECTIONS_DIR),
            annotated_path: PathBuf::from(DEFAULT_ANNOTATED_PATH),
            json_path: None,
            rewrite: render::RewriteOptions::default(),
        }
    }
}

/// Fetch if needed, then split into sections and write the annotated copy.
///
/// Runs against the same output folder must not overlap.
pub fn run_sync(opts: &SyncOptions) -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();

    let buf = source::load_or_fetch(&opts.cache_path, &opts.source_url)?;
    let parsed = parse::parse_document(&buf)?;
    for d in &parsed.diagnostics {
        match d.span {
            Some(span) => log::warn!("{} at byte {}: {}", d.code, span.start, d.message),
            None => log::warn!("{}: {}", d.code, d.message),
        }
    }
    log::info!(
        "parsed {} ({} bytes, {} blocks)",
        opts.cache_path.display(),
        buf.len(),
        parsed.nodes.len()
    );

    if let Some(json_path) = &opts.json_path {
        write_node_file(&opts.cache_path, &buf, &parsed, json_path)?;
    }

    // sections
    fs::create_dir_all(&opts.sections_dir)?;
    let cursor = split::split_sections_to_dir(&buf, &parsed.nodes, &opts.sections_dir)?;
    log::info!(
        "wrote sections to {} ({} trailing bytes after the last heading not written)",
        opts.sections_dir.display(),
        buf.len() - cursor
    );

    // annotated copy
    let annotated = render::annotate(&buf, &opts.rewrite)?;
    ensure_parent(&opts.annotated_path)?;
    fs::write(&opts.annotated_path, &annotated)?;
    log::info!(
        "wrote {} ({} bytes)",
        opts.annotated_path.display(),
        annotated.len()
    );

    log::info!("done in {:.3}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

fn write_node_file(
    source_path: &Path,
    buf: &[u8],
    parsed: &parse::ParseOutput,
    json_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let file = ast::NodeFile {
        schema_version: ast::SCHEMA_VERSION,
        parser: ast::ParserInfo::default(),
        source: ast::SourceInfo {
            path: Some(source_path.to_string_lossy().to_string()),
            byte_len: buf.len(),
        },
        diagnostics: parsed.diagnostics.clone(),
        nodes: parsed.nodes.clone(),
    };

    // prettify JSON so it's easy to inspect / diff.
    let json = serde_json::to_string_pretty(&file)?;
    ensure_parent(json_path)?;
    fs::write(json_path, json)?;
    log::debug!("wrote node dump to {}", json_path.display());
    Ok(())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
