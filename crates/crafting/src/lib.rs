#![warn(missing_docs)]
//! Per-player timed crafting queue.
//!
//! A bounded FIFO of in-progress craft jobs. Only the head job runs; the
//! rest sit paused until they become the head. Materials are consumed when a
//! craft starts and returned when an unfinished job is canceled.

mod job;
mod queue;
mod start;

pub use job::{CraftJob, JobState};
pub use queue::{CraftQueue, QueueEvent, MAX_QUEUE_SIZE};
pub use start::{start_craft, CraftStartError};
