//! Collaborator seams and result types for the publish protocol
//!
//! The publisher coordinates three external collaborators: the per-build
//! job state store, the artifact transfer worker, and the orchestrator's
//! reporting client. Each is a trait so the protocol can be tested against
//! recording fakes and wired to real transports elsewhere.

use crate::core::error::TransferError;
use crate::core::job_state::{ArtifactDescriptor, JobCredentials, JobStateModel};
use crate::core::outputs::OutputDeclaration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Outcome of the upstream build/test step, as handed to the publisher by
/// the build-step driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildOutcome {
    Succeeded,
    Failed,
}

impl BuildOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Result of attempting to move one output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferOutcome {
    Transferred,
    Failed { reason: String },
}

/// Final outcome of one publish invocation: the single piece of
/// information propagated back to the build-step driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub succeeded: bool,
    pub message: String,
}

impl PublishResult {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }
}

/// Per-build storage of the active [`JobStateModel`].
///
/// Passed explicitly into the publisher by the build-step driver; one
/// store instance belongs to exactly one build context and is never shared
/// mutably across concurrent builds.
pub trait JobStateStore: Send + Sync {
    /// Handle to the active model, if one was populated for this build.
    fn model(&self) -> Option<Arc<RwLock<JobStateModel>>>;

    /// Drop the model from the store. Idempotent.
    fn remove_model(&self);
}

/// Compresses and uploads one build output to its destination artifact
/// location. Timeout and retry policy live behind this seam, not in the
/// publisher.
#[async_trait]
pub trait ArtifactTransferWorker: Send + Sync {
    async fn transfer(
        &self,
        build_name: &str,
        declaration: &OutputDeclaration,
        destination: &ArtifactDescriptor,
        credentials: &JobCredentials,
    ) -> Result<TransferOutcome, TransferError>;
}

/// Authenticated client for the orchestrator's terminal result signals.
///
/// Errors are opaque network/auth failures; the publisher never retries
/// them.
#[async_trait]
pub trait OrchestratorClient: Send + Sync {
    async fn report_success(&self, action_id: Uuid, job_id: Uuid) -> anyhow::Result<()>;

    async fn report_failure(
        &self,
        action_id: Uuid,
        job_id: Uuid,
        message: &str,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_outcome_succeeded() {
        assert!(BuildOutcome::Succeeded.succeeded());
        assert!(!BuildOutcome::Failed.succeeded());
    }

    #[test]
    fn test_publish_result_success_has_empty_message() {
        let result = PublishResult::success();
        assert!(result.succeeded);
        assert!(result.message.is_empty());
    }

    #[test]
    fn test_publish_result_failure_carries_message() {
        let result = PublishResult::failure("Tests failed");
        assert!(!result.succeeded);
        assert_eq!(result.message, "Tests failed");
    }

    #[test]
    fn test_transfer_outcome_serialization() {
        let outcome = TransferOutcome::Failed {
            reason: "disk full".to_string(),
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("disk full"));

        let deserialized: TransferOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, outcome);
    }
}
