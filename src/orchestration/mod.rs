//! Orchestration layer for the publish-and-report protocol
//!
//! Coordinates validation, conditional artifact transfer, terminal result
//! reporting, and per-build state cleanup for one finished build step.

pub mod publish_orchestrator;

// Re-export main types for convenience
pub use publish_orchestrator::PublishOrchestrator;
