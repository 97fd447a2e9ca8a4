//! Completion phase of a CI build step bound to a pipeline orchestrator
//! job: validate configured outputs against the job's declared artifacts,
//! transfer artifacts for successful builds, report a terminal result, and
//! clear per-build job state on every exit path.

pub mod core;
pub mod orchestration;
pub mod store;

pub use core::*;
pub use orchestration::PublishOrchestrator;
pub use store::{JobStateRegistry, JobStateSlot};
