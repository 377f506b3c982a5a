use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;
use std::thread;

use crate::pipeline::{self, CancelToken, CoordinatorReport, Dispatcher, PipelineHandles};
use crate::sink::Sink;
use crate::{Opts, RunReport};

/// Start the walk + decode pipeline. Returns the collector receiver and the coordinator handle;
/// caller drains `record_rx` and then joins `coordinator`.
///
/// Walk thread: enumerate and dispatch. Coordinator thread: join the walk, then every worker,
/// then close the collector.
pub fn run_pipeline(root: &Path, opts: &Opts, cancel: CancelToken) -> Result<PipelineHandles> {
    let channels = pipeline::create_pipeline_channels(root, opts, cancel);
    let dispatcher = Dispatcher::new(channels.record_tx, &channels.ctx);
    let cancel = channels.ctx.cancel.clone();

    let walk_handle =
        pipeline::spawn_walk_thread(channels.ctx, dispatcher).context("spawn walk thread")?;

    let coordinator_cancel = cancel.clone();
    let coordinator = thread::Builder::new()
        .name(format!("{}-coordinator", env!("CARGO_PKG_NAME")))
        .spawn(move || {
            let (dispatcher, walked) = match walk_handle.join() {
                Ok(joined) => joined,
                Err(_) => {
                    // Dispatcher was dropped during unwind; workers still hold their own senders.
                    coordinator_cancel.cancel();
                    warn!("walk thread panicked");
                    return CoordinatorReport::default();
                }
            };
            let enumeration = match walked {
                Ok(selected) => {
                    debug!("walk: {} paths selected", selected);
                    None
                }
                Err(e) => {
                    // Stop in-flight workers; they are still joined below.
                    coordinator_cancel.cancel();
                    Some(e)
                }
            };
            let dispatched = dispatcher.join_all();
            CoordinatorReport {
                dispatched,
                enumeration,
            }
        });
    let coordinator = match coordinator {
        Ok(h) => h,
        Err(e) => {
            cancel.cancel();
            return Err(e).context("spawn coordinator thread");
        }
    };

    Ok(PipelineHandles {
        record_rx: channels.record_rx,
        coordinator,
        cancel,
        errors: channels.errors,
    })
}

/// Main orchestrator: walk `root`, decode every matching file concurrently, hand each record to `sink`
/// on the calling thread, and return the joined outcome once the collector is closed.
/// Walk → one worker per path → bounded collector → drain → sink.
pub fn gather<S>(root: &Path, opts: &Opts, sink: &mut S, cancel: CancelToken) -> Result<RunReport>
where
    S: Sink + ?Sized,
{
    let PipelineHandles {
        record_rx,
        coordinator,
        cancel,
        errors,
    } = run_pipeline(root, opts, cancel)?;

    let delivered = pipeline::drain(record_rx, sink);

    let CoordinatorReport {
        dispatched,
        enumeration,
    } = coordinator
        .join()
        .map_err(|_| anyhow::anyhow!("coordinator thread panicked"))?;

    let outcome = pipeline::collect_run_outcome(enumeration, &errors, &cancel);
    debug!(
        "dispatched {}, delivered {}, failed {}",
        dispatched,
        delivered,
        outcome.error_count()
    );
    Ok(RunReport {
        dispatched,
        delivered,
        outcome,
    })
}
