//! jsongather: concurrent discover-decode-collect over a directory tree
//!
//! Walk a root, start one decode worker per matching file, funnel records through a
//! bounded collector to a single drain loop, and join every failure into one [`RunOutcome`].

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{DecodeError, EnumerationError, FileError, RunOutcome};
pub use pipeline::CancelToken;
pub use sink::{DiscardSink, LogSink, Sink};
pub use types::*;

use log::debug;
use std::path::Path;

/// Result alias used by public jsongather API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: gather every record under `root` into `sink` and return the run report.
///
/// Records reach `sink` on the calling thread, in arrival order (not walk order). Per-file and
/// walk failures do not make this return `Err`; they land in [`RunReport::outcome`]. `Err` means
/// the pipeline could not be started.
///
/// ```ignore
/// let mut records = Vec::new();
/// let report = jsongather::gather_dir(path, &GatherOpts::default(), &mut |r: Record| records.push(r))?;
/// report.outcome.into_result()?;
/// ```
pub fn gather_dir<S>(root: &Path, opts: &GatherOpts, sink: &mut S) -> Result<RunReport>
where
    S: Sink + ?Sized,
{
    gather_dir_with_cancel(root, opts, sink, CancelToken::new())
}

/// Like [`gather_dir`], with a caller-held [`CancelToken`]. Cancelling stops new dispatch and
/// abandons pending pushes; the call still returns only after every worker has finished.
pub fn gather_dir_with_cancel<S>(
    root: &Path,
    opts: &GatherOpts,
    sink: &mut S,
    cancel: CancelToken,
) -> Result<RunReport>
where
    S: Sink + ?Sized,
{
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    pipeline::gather(root, &opts, sink, cancel)
}
