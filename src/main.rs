use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use guide2md::render::{DEFAULT_CODE_LANG, RewriteOptions};
use guide2md::source::DEFAULT_SOURCE_URL;
use guide2md::{DEFAULT_ANNOTATED_PATH, DEFAULT_CACHE_PATH, DEFAULT_SECTIONS_DIR, SyncOptions};

/// Split the C++ Core Guidelines into per-section markdown files and write
/// an annotated copy with tagged code blocks and admonitions.
#[derive(Debug, Parser)]
#[command(name = "guide2md", version)]
struct Cli {
    /// Print more log messages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download the guideline file if missing, then split and annotate it
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
struct SyncArgs {
    /// URL to download the guideline markdown file from
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    source: String,

    /// Local copy of the guideline file; downloaded if it does not exist
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    /// Directory for the per-section files
    #[arg(long, default_value = DEFAULT_SECTIONS_DIR)]
    out: PathBuf,

    /// Path of the annotated single-file output
    #[arg(long, default_value = DEFAULT_ANNOTATED_PATH)]
    annotated: PathBuf,

    /// Language tag for decorated code blocks
    #[arg(long, default_value = DEFAULT_CODE_LANG)]
    lang: String,

    /// Also dump the parsed block sequence as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

impl From<SyncArgs> for SyncOptions {
    fn from(args: SyncArgs) -> Self {
        SyncOptions {
            source_url: args.source,
            cache_path: args.cache,
            sections_dir: args.out,
            annotated_path: args.annotated,
            json_path: args.json,
            rewrite: RewriteOptions {
                code_lang: args.lang,
                ..RewriteOptions::default()
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    // RUST_LOG, when set, overrides the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("verbose: {}", cli.verbose);

    let result = match cli.command {
        Command::Sync(args) => {
            let opts = SyncOptions::from(args);
            log::info!("source: {}", opts.source_url);
            guide2md::run_sync(&opts)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
