//! Collector: the bounded record queue and its single drain loop.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;

use crate::Record;
use crate::sink::Sink;
use crate::utils::config::COLLECTOR_CAPACITY;

/// Bounded queue between decode workers and the drain loop. Pushes block while it is full.
pub fn collector_channel() -> (Sender<Record>, Receiver<Record>) {
    bounded::<Record>(COLLECTOR_CAPACITY)
}

/// Hand every record to `sink` in arrival order. Returns once the queue is closed and empty.
pub fn drain<S>(record_rx: Receiver<Record>, sink: &mut S) -> usize
where
    S: Sink + ?Sized,
{
    let mut delivered = 0_usize;
    while let Ok(record) = record_rx.recv() {
        sink.accept(record);
        delivered += 1;
    }
    debug!("drain: collector closed, {} records delivered", delivered);
    delivered
}
