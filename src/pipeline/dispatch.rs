//! Worker dispatch: one decode thread per selected path, results pushed into the collector.

use crossbeam_channel::{Receiver, Sender, bounded, select};
use log::{debug, warn};
use std::path::PathBuf;
use std::sync::PoisonError;
use std::thread::{self, JoinHandle};

use crate::Record;
use crate::engine::decoder::load_record;
use crate::error::FileError;

use super::cancel::CancelToken;
use super::context::{ErrorSet, PipelineContext};

/// Caps how many decode workers run at once. Each worker holds a [`Permit`] for its lifetime.
pub struct InFlightLimit {
    acquire_tx: Sender<()>,
    release_rx: Receiver<()>,
}

/// Frees one slot of an [`InFlightLimit`] on drop.
pub struct Permit {
    release_rx: Receiver<()>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        let _ = self.release_rx.try_recv();
    }
}

impl InFlightLimit {
    pub fn new(max: usize) -> Self {
        let (acquire_tx, release_rx) = bounded::<()>(max.max(1));
        Self {
            acquire_tx,
            release_rx,
        }
    }

    /// Block until a slot is free. None if `cancel` fires first.
    pub fn acquire(&self, cancel: &CancelToken) -> Option<Permit> {
        select! {
            send(self.acquire_tx, ()) -> res => res.ok().map(|_| Permit {
                release_rx: self.release_rx.clone(),
            }),
            recv(cancel.signal()) -> _ => None,
        }
    }
}

/// Spawns and tracks decode workers. Owns the original collector sender: dropping the dispatcher
/// after [`Dispatcher::join_all`] is what closes the collector.
pub struct Dispatcher {
    record_tx: Sender<Record>,
    errors: ErrorSet,
    cancel: CancelToken,
    limit: Option<InFlightLimit>,
    max_file_size: Option<u64>,
    handles: Vec<(PathBuf, JoinHandle<()>)>,
}

impl Dispatcher {
    pub fn new(record_tx: Sender<Record>, ctx: &PipelineContext) -> Self {
        Self {
            record_tx,
            errors: ctx.errors.clone(),
            cancel: ctx.cancel.clone(),
            limit: ctx.max_in_flight.map(InFlightLimit::new),
            max_file_size: ctx.max_file_size,
            handles: Vec::new(),
        }
    }

    /// Launch a worker for `path`. Returns false once the run is cancelled (walk should stop).
    pub fn dispatch(&mut self, path: PathBuf) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        let permit = match &self.limit {
            Some(limit) => match limit.acquire(&self.cancel) {
                Some(p) => Some(p),
                None => return false,
            },
            None => None,
        };

        let record_tx = self.record_tx.clone();
        let errors = self.errors.clone();
        let cancel = self.cancel.clone();
        let max_file_size = self.max_file_size;
        let worker_path = path.clone();
        let spawned = thread::Builder::new()
            .name(format!("{}-decode", env!("CARGO_PKG_NAME")))
            .spawn(move || {
                let _permit = permit;
                decode_worker(worker_path, record_tx, errors, cancel, max_file_size);
            });
        match spawned {
            Ok(handle) => self.handles.push((path, handle)),
            // Counted as a per-file failure; the rest of the run continues.
            Err(source) => push_error(&self.errors, FileError::Io { path, source }),
        }
        true
    }

    /// Workers launched so far.
    pub fn dispatched(&self) -> usize {
        self.handles.len()
    }

    /// Join barrier: wait for every worker, then drop the dispatcher's collector sender.
    /// Workers hold the only other senders, so the collector closes exactly here.
    /// A panicked worker counts as a failure for its path.
    pub fn join_all(self) -> usize {
        let Dispatcher {
            record_tx,
            errors,
            handles,
            ..
        } = self;
        let dispatched = handles.len();
        for (path, h) in handles {
            if h.join().is_err() {
                warn!("decode worker for {} panicked", path.display());
                push_error(&errors, FileError::WorkerPanicked { path });
            }
        }
        drop(record_tx);
        debug!("coordinator: {} workers finished, collector closed", dispatched);
        dispatched
    }
}

fn push_error(errors: &ErrorSet, err: FileError) {
    errors
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(err);
}

/// Single decode worker: load + decode `path`, push the record or contribute the error.
/// A push blocked on a full collector is abandoned when the run is cancelled.
fn decode_worker(
    path: PathBuf,
    record_tx: Sender<Record>,
    errors: ErrorSet,
    cancel: CancelToken,
    max_file_size: Option<u64>,
) {
    if cancel.is_cancelled() {
        return;
    }
    match load_record(&path, max_file_size) {
        Ok(record) => {
            select! {
                send(record_tx, record) -> res => {
                    if res.is_err() {
                        debug!("collector gone, dropping record from {}", path.display());
                    }
                }
                recv(cancel.signal()) -> _ => {
                    debug!("cancelled, dropping record from {}", path.display());
                }
            }
        }
        Err(err) => {
            debug!("{}", err);
            push_error(&errors, err);
        }
    }
}
