use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::DEFAULT_ROOT;

/// Concurrent JSON record gatherer.
#[derive(Clone, Debug, Parser)]
#[command(name = "jsongather")]
#[command(about = "Decode every matching file under DIR concurrently and stream the records.")]
pub struct Cli {
    /// Directory to walk. Default: ./json_files.
    #[arg(value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub dir: PathBuf,

    /// File extension to select (without the dot). Default: json.
    #[arg(long, short = 'e', value_name = "EXT")]
    pub ext: Option<String>,

    /// Exclude patterns (glob syntax). Can specify multiple: -x pattern1 pattern2 pattern3
    #[arg(long, short = 'x', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Walk directories in parallel (jwalk).
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub parallel_walk: Option<bool>,

    /// Maximum decode workers running at once. Default: one per file, unbounded.
    #[arg(long, short = 'j', value_name = "N", value_parser = clap::value_parser!(usize))]
    pub max_in_flight: Option<usize>,

    /// Reject files larger than this many bytes instead of reading them.
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64))]
    pub max_file_size: Option<u64>,

    /// Verbose output (debug logs and a record counter).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Do not log each received record.
    #[arg(long, short = 'q', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub quiet: Option<bool>,
}

impl Cli {
    /// `--ext` with any leading dot removed.
    pub fn extension(&self) -> Option<String> {
        self.ext
            .as_deref()
            .map(|e| e.trim_start_matches('.').to_string())
    }
}
