//! Publish-and-report orchestration
//!
//! Runs the completion phase of one build step bound to an orchestrator
//! job: validate the configured outputs against the job's declared
//! artifacts, transfer artifacts when the build succeeded, report a
//! terminal success/failure result, and clear the per-build job state.
//! Reporting and cleanup run on every exit path where a model exists.

use crate::core::error::PublishError;
use crate::core::job_state::{CompressionMode, JobStateModel, OrchestratorJob};
use crate::core::outputs::OutputDeclaration;
use crate::core::phase::{PhaseTrace, PublishPhase};
use crate::core::traits::{
    ArtifactTransferWorker, BuildOutcome, JobStateStore, OrchestratorClient, PublishResult,
    TransferOutcome,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Coordinates the transfer worker and orchestrator client for one build
/// step. Invoked synchronously by the build-step driver; there is no
/// internal parallelism across the protocol steps.
pub struct PublishOrchestrator {
    build_name: String,
    transfer_worker: Arc<dyn ArtifactTransferWorker>,
    client: Arc<dyn OrchestratorClient>,
}

impl PublishOrchestrator {
    /// Create a new orchestrator for the named build.
    ///
    /// # Arguments
    ///
    /// * `build_name` - Project/build name handed to the transfer worker
    /// * `transfer_worker` - Compresses and uploads one output per call
    /// * `client` - Reports the terminal job result
    pub fn new(
        build_name: impl Into<String>,
        transfer_worker: Arc<dyn ArtifactTransferWorker>,
        client: Arc<dyn OrchestratorClient>,
    ) -> Self {
        Self {
            build_name: build_name.into(),
            transfer_worker,
            client,
        }
    }

    /// Run the publish-and-report sequence for one finished build step.
    pub async fn perform_publish(
        &self,
        outcome: BuildOutcome,
        configured_outputs: &[OutputDeclaration],
        store: &dyn JobStateStore,
    ) -> PublishResult {
        let (result, _trace) = self
            .perform_publish_traced(outcome, configured_outputs, store)
            .await;
        result
    }

    /// Same as [`perform_publish`](Self::perform_publish), also returning
    /// the phase trace of the invocation.
    pub async fn perform_publish_traced(
        &self,
        outcome: BuildOutcome,
        configured_outputs: &[OutputDeclaration],
        store: &dyn JobStateStore,
    ) -> (PublishResult, PhaseTrace) {
        let mut trace = PhaseTrace::new();

        // State-corruption guard: without a model there is no job to
        // report against and nothing to clean.
        let Some(handle) = store.model() else {
            error!("no active job state for this build");
            trace.advance(PublishPhase::Done);
            return (
                PublishResult::failure(PublishError::MissingJobState.to_string()),
                trace,
            );
        };

        let snapshot = handle.read().await.clone();

        let mut succeeded = outcome.succeeded();
        // Pre-classified failure message; overridden by any error below.
        let mut message = snapshot.category().default_failure_message().to_string();

        // Manually triggered build with no pipeline job to satisfy: there
        // is nothing to report against, so keep the model for the driver.
        let Some(job) = snapshot.job() else {
            debug!("build not linked to an orchestrator job, skipping publish");
            trace.advance(PublishPhase::Done);
            let result = if succeeded {
                PublishResult::success()
            } else {
                PublishResult::failure(message)
            };
            return (result, trace);
        };

        info!(build = %self.build_name, job_id = %job.id, "publishing artifacts");

        if let Err(err) = self
            .validate_and_transfer(outcome, configured_outputs, &snapshot, job, &mut trace)
            .await
        {
            error!(error = %err, "publish failed");
            message = err.to_string();
            succeeded = false;
        }

        // Report exactly once, whatever the steps above concluded.
        trace.advance(PublishPhase::Reporting);
        let report = if succeeded {
            self.client.report_success(snapshot.action_id(), job.id).await
        } else {
            self.client
                .report_failure(snapshot.action_id(), job.id, &message)
                .await
        };

        // Cleanup runs even when the report call itself failed.
        {
            let mut model = handle.write().await;
            model.clear_job();
            model.set_compression(CompressionMode::None);
        }
        store.remove_model();
        trace.advance(PublishPhase::Cleaned);

        if let Err(err) = report {
            // Known limitation: not retried, so the orchestrator may still
            // consider the job pending even though artifacts are uploaded.
            error!(error = %err, "failed to report job result to orchestrator");
        }

        trace.advance(PublishPhase::Done);
        let result = if succeeded {
            PublishResult::success()
        } else {
            PublishResult::failure(message)
        };
        (result, trace)
    }

    /// Cardinality validation and conditional transfer. Validation always
    /// runs, even for failed builds; transfer only runs for a successful
    /// build with configured outputs.
    async fn validate_and_transfer(
        &self,
        outcome: BuildOutcome,
        configured_outputs: &[OutputDeclaration],
        model: &JobStateModel,
        job: &OrchestratorJob,
        trace: &mut PhaseTrace,
    ) -> Result<(), PublishError> {
        let expected = job.output_artifacts.len();
        if configured_outputs.len() != expected {
            return Err(PublishError::OutputCountMismatch {
                configured: configured_outputs.len(),
                expected,
            });
        }
        trace.advance(PublishPhase::Validated);

        // An empty output list with a successful build is valid: this
        // build step has nothing to publish.
        if configured_outputs.is_empty() || !outcome.succeeded() {
            trace.advance(PublishPhase::SkippedTransfer);
            return Ok(());
        }

        trace.advance(PublishPhase::Transferring);
        for (declaration, destination) in configured_outputs.iter().zip(&job.output_artifacts) {
            debug!(
                output = declaration.output(),
                artifact = %destination.name,
                "transferring build output"
            );

            let transferred = self
                .transfer_worker
                .transfer(&self.build_name, declaration, destination, model.credentials())
                .await?;

            match transferred {
                TransferOutcome::Transferred => {}
                TransferOutcome::Failed { reason } => {
                    return Err(PublishError::TransferRejected {
                        output: declaration.output().to_string(),
                        reason,
                    });
                }
            }
        }

        Ok(())
    }
}
