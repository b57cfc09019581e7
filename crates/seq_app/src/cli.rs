use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use seq_logging::LogDestination;

/// Write audio files to a folder one by one, in exactly the given order.
///
/// Many car stereos and USB players play files in the order they were
/// written, not by name. Folders are expanded recursively in name order.
#[derive(Debug, Parser)]
#[command(name = "seqwrite", version)]
pub(crate) struct Args {
    /// Audio files or folders, in the order they should be written.
    #[arg(required = true, value_name = "SOURCES")]
    pub sources: Vec<PathBuf>,

    /// Existing destination folder.
    #[arg(short, long, value_name = "DIR", env = "SEQWRITE_DEST")]
    pub dest: PathBuf,

    /// Remove ID3 and other embedded tags while writing.
    #[arg(long, conflicts_with = "keep_tags")]
    pub strip_tags: bool,

    /// Copy files unchanged, overriding the settings file.
    #[arg(long)]
    pub keep_tags: bool,

    /// Settings file (RON). Defaults to ./seqwrite.ron when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print one JSON object per event instead of a progress bar.
    #[arg(long)]
    pub json: bool,

    /// Where to log: file, terminal or both.
    #[arg(long, value_name = "WHERE")]
    pub log: Option<LogDestination>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Command-line flags win over the settings file.
    pub(crate) fn strip_tags_or(&self, default: bool) -> bool {
        if self.strip_tags {
            true
        } else if self.keep_tags {
            false
        } else {
            default
        }
    }

    pub(crate) fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
