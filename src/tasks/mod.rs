//! Background generation tasks
//!
//! Every feedback submission becomes a task: an entry in the in-memory
//! [`TaskStore`] that clients poll, and a spawned [`GenerationPipeline`] run
//! that moves the entry through its statuses.

pub mod pipeline;
pub mod store;

pub use pipeline::{GenerationPipeline, GenerationRequest, PipelineError};
pub use store::{TaskId, TaskRecord, TaskStatus, TaskStore};
