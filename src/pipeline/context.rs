//! Pipeline context: shared data passed into the walk thread, plus the channels and shared state.

use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::Opts;
use crate::Record;
use crate::error::{EnumerationError, FileError};

use super::cancel::CancelToken;
use super::collector::collector_channel;

/// Per-file errors joined across all decode workers.
pub type ErrorSet = Arc<Mutex<Vec<FileError>>>;

/// Shared context for the walk + dispatch thread.
#[derive(Clone, Debug)]
pub struct PipelineContext {
    pub root: PathBuf,
    pub extension: String,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub parallel_walk: bool,
    pub max_in_flight: Option<usize>,
    pub max_file_size: Option<u64>,
    pub cancel: CancelToken,
    pub errors: ErrorSet,
}

/// What the coordinator knows once every dispatched worker has finished and the collector is closed.
#[derive(Debug, Default)]
pub struct CoordinatorReport {
    pub dispatched: usize,
    pub enumeration: Option<EnumerationError>,
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): drain `record_rx`, then join `coordinator`.
pub struct PipelineHandles {
    pub record_rx: Receiver<Record>,
    pub coordinator: JoinHandle<CoordinatorReport>,
    pub cancel: CancelToken,
    pub errors: ErrorSet,
}

/// Collector channel and shared state. The walk thread takes `record_tx` and `ctx`; the caller keeps `record_rx`.
pub struct PipelineChannels {
    pub record_tx: Sender<Record>,
    pub record_rx: Receiver<Record>,
    pub errors: ErrorSet,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(root: &Path, opts: &Opts, cancel: CancelToken) -> PipelineChannels {
    let (record_tx, record_rx) = collector_channel();
    let errors: ErrorSet = Arc::new(Mutex::new(Vec::new()));

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        extension: opts.extension.clone(),
        exclude: opts.exclude.clone(),
        follow_links: opts.follow_links,
        parallel_walk: opts.parallel_walk,
        max_in_flight: opts.max_in_flight,
        max_file_size: opts.max_file_size,
        cancel,
        errors: Arc::clone(&errors),
    };

    PipelineChannels {
        record_tx,
        record_rx,
        errors,
        ctx,
    }
}
