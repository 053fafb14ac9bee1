pub mod merge_planner;
pub mod pipeline;

pub use merge_planner::{plan, SyncAction};
pub use pipeline::{RunOutcome, SyncPipeline};
