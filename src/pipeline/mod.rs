//! Pipeline components: walk, dispatch, collector, coordinator, error joining.

pub mod cancel;
pub mod collector;
pub mod context;
pub mod dispatch;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;

pub use cancel::CancelToken;
pub use collector::{collector_channel, drain};
pub use context::{
    CoordinatorReport, ErrorSet, PipelineChannels, PipelineContext, PipelineHandles,
    create_pipeline_channels,
};
pub use dispatch::{Dispatcher, InFlightLimit, Permit};
pub use error_handler::collect_run_outcome;
pub use orchestrator::{gather, run_pipeline};
pub use walk::{WalkOutcome, run_walk_loop, spawn_walk_thread, walk_iter};
