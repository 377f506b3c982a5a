//! Progress counter for records delivered to a sink

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

use crate::Record;
use crate::sink::Sink;

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a counter for unknown total (shows count without percentage)
pub fn create_counter(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " records"
    )))
}

/// Update progress bar if available
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking)
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Force a refresh of the bar (e.g. so counter shows "0 records" immediately).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.refresh();
    }
}

/// Wraps another sink and ticks a counter per delivered record.
pub struct ProgressSink {
    inner: Box<dyn Sink>,
    bar: ProgressBar,
}

impl ProgressSink {
    pub fn new(inner: Box<dyn Sink>, desc: &'static str) -> Self {
        let bar = create_counter(desc);
        refresh_bar(&bar);
        Self { inner, bar }
    }
}

impl Sink for ProgressSink {
    fn accept(&mut self, record: Record) {
        self.inner.accept(record);
        update_progress_bar(&self.bar, 1);
    }
}

impl Drop for ProgressSink {
    fn drop(&mut self) {
        refresh_bar(&self.bar);
        eprintln!();
    }
}
