//! Record consumers. The drain loop hands every delivered record to exactly one [`Sink`].

use log::info;

use crate::Record;

/// Consumer of decoded records. Called on the draining thread, in arrival order.
pub trait Sink {
    fn accept(&mut self, record: Record);
}

impl<F> Sink for F
where
    F: FnMut(Record),
{
    fn accept(&mut self, record: Record) {
        self(record)
    }
}

/// Logs each record at info level (default CLI sink).
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl Sink for LogSink {
    fn accept(&mut self, record: Record) {
        info!("data with id #{} is received: {}", record.id, record.value);
    }
}

/// Drops records; used with `--quiet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    fn accept(&mut self, _record: Record) {}
}
