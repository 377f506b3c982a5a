use log::warn;
use std::sync::PoisonError;

use crate::error::{EnumerationError, RunOutcome};

use super::cancel::CancelToken;
use super::context::ErrorSet;

/// Join the run's failures into one [`RunOutcome`]. Call after the coordinator has joined every worker.
///
/// A cancelled token only counts as `cancelled` when no enumeration error caused it.
pub fn collect_run_outcome(
    enumeration: Option<EnumerationError>,
    errors: &ErrorSet,
    cancel: &CancelToken,
) -> RunOutcome {
    let file_errors = std::mem::take(&mut *errors.lock().unwrap_or_else(PoisonError::into_inner));
    let cancelled = cancel.is_cancelled() && enumeration.is_none();

    if let Some(e) = &enumeration {
        warn!("{}", e);
    }
    if !file_errors.is_empty() {
        warn!("{} files failed to load or decode", file_errors.len());
    }
    if cancelled {
        warn!("Run cancelled; remaining files were not processed");
    }

    RunOutcome {
        enumeration,
        file_errors,
        cancelled,
    }
}
