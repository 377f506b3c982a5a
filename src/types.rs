//! Public and internal types for the jsongather API and pipeline.

use serde::Deserialize;

use crate::RunOutcome;
use crate::utils::config::DEFAULT_EXTENSION;

/// One decoded file. Unknown JSON fields are ignored; `id` and `value` are required.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Record {
    pub id: i64,
    pub value: String,
}

/// What a finished run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files handed to a worker.
    pub dispatched: usize,
    /// Records handed to the sink.
    pub delivered: usize,
    /// Joined errors; empty on success.
    pub outcome: RunOutcome,
}

/// Lib-only options for [`gather_dir`](crate::gather_dir). No config file or CLI involvement.
#[derive(Clone, Debug)]
pub struct GatherOpts {
    /// File extension to select, without the dot. Compared case-sensitively.
    pub extension: String,
    /// Exclude patterns (glob syntax, e.g. `drafts`, `*.bak.json`).
    pub exclude: Vec<String>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Walk with jwalk (parallel directory reads) instead of walkdir.
    pub parallel_walk: bool,
    /// Cap on concurrently running decode workers. None = one worker per file, unbounded.
    pub max_in_flight: Option<usize>,
    /// Files larger than this (bytes) fail with `TooLarge` instead of being read.
    pub max_file_size: Option<u64>,
}

impl Default for GatherOpts {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            exclude: Vec::new(),
            follow_links: false,
            parallel_walk: false,
            max_in_flight: None,
            max_file_size: None,
        }
    }
}

impl From<&GatherOpts> for Opts {
    fn from(o: &GatherOpts) -> Self {
        Opts {
            extension: o.extension.clone(),
            exclude: o.exclude.clone(),
            follow_links: o.follow_links,
            parallel_walk: o.parallel_walk,
            max_in_flight: o.max_in_flight,
            max_file_size: o.max_file_size,
            verbose: false,
            quiet: false,
        }
    }
}

/// Full options (CLI). Use [`GatherOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    pub extension: String,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub parallel_walk: bool,
    pub max_in_flight: Option<usize>,
    pub max_file_size: Option<u64>,
    /// Debug logging and a progress counter.
    pub verbose: bool,
    /// Do not log each record.
    pub quiet: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts::from(&GatherOpts::default())
    }
}
