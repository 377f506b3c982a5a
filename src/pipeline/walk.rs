//! Path enumeration: walk the root, select matching files, stop on the first traversal error.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use log::debug;

use crate::engine::tools::should_include_in_walk;
use crate::error::EnumerationError;

use super::context::PipelineContext;
use super::dispatch::Dispatcher;

/// One result from a directory walk: either an entry to consider or an error with optional path.
pub enum WalkOutcome {
    Ok { path: PathBuf, is_dir: bool },
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a jwalk result into [`WalkOutcome`].
pub fn to_outcome_jwalk(r: Result<jwalk::DirEntry<((), ())>, jwalk::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok {
            is_dir: entry.file_type().is_dir(),
            path: entry.path(),
        },
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => WalkOutcome::Ok {
            is_dir: entry.file_type().is_dir(),
            path: entry.into_path(),
        },
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

fn jwalk_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use jwalk::Parallelism;
    use std::time::Duration;
    Box::new(
        jwalk::WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .skip_hidden(false)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_secs(60),
            })
            .into_iter()
            .map(to_outcome_jwalk),
    )
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use walkdir::WalkDir;
    Box::new(
        WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .into_iter()
            .map(to_outcome_walkdir),
    )
}

/// Lazy, recursive walk of `ctx.root` using the configured walker.
pub fn walk_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    if ctx.parallel_walk {
        debug!("Walking in parallel");
        jwalk_iter(ctx)
    } else {
        debug!("Walking serially");
        walkdir_iter(ctx)
    }
}

/// Consume `iter`, skip directories, filter with `should_include_in_walk`, and hand each selected path
/// to `on_path`. Stops when `on_path` returns false (run cancelled).
///
/// The first [`WalkOutcome::Err`] ends the walk and is returned as the run's fatal error; no
/// further paths are handed out. Returns the number of paths handed out otherwise.
pub fn run_walk_loop<I, F>(ctx: &PipelineContext, iter: I, mut on_path: F) -> Result<usize, EnumerationError>
where
    I: Iterator<Item = WalkOutcome>,
    F: FnMut(PathBuf) -> bool,
{
    let mut count = 0_usize;
    for outcome in iter {
        match outcome {
            WalkOutcome::Ok { path, is_dir } => {
                if is_dir || !should_include_in_walk(&path, &ctx.root, &ctx.extension, &ctx.exclude) {
                    continue;
                }
                if !on_path(path) {
                    debug!("walk: stopped after {} paths (cancelled)", count);
                    break;
                }
                count += 1;
            }
            WalkOutcome::Err { msg, path } => {
                return Err(EnumerationError {
                    path: path.unwrap_or_else(|| ctx.root.clone()),
                    message: msg,
                });
            }
        }
    }
    Ok(count)
}

/// Spawn the walk thread: enumerate and dispatch one worker per selected path.
/// Returns the dispatcher (still owning its collector sender) so the coordinator can join the workers.
pub fn spawn_walk_thread(
    ctx: PipelineContext,
    mut dispatcher: Dispatcher,
) -> std::io::Result<JoinHandle<(Dispatcher, Result<usize, EnumerationError>)>> {
    thread::Builder::new()
        .name(format!("{}-walk", env!("CARGO_PKG_NAME")))
        .spawn(move || {
            let iter = walk_iter(&ctx);
            let walked = run_walk_loop(&ctx, iter, |path| dispatcher.dispatch(path));
            (dispatcher, walked)
        })
}
