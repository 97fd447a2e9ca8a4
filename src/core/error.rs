//! Error taxonomy for the publish-and-report protocol
//!
//! Each failure family the publisher can observe gets its own variant so
//! the reporting step can match on it exhaustively. Errors carry the
//! human-readable message that ends up in the orchestrator's failure
//! report and the CI console log.

use thiserror::Error;

/// Failure raised by an [`ArtifactTransferWorker`](crate::core::ArtifactTransferWorker)
/// while compressing or uploading one build output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Reading the output or writing to the destination failed.
    #[error("artifact transfer I/O error: {message}")]
    Io { message: String },

    /// The build was aborted while the transfer was in flight. Treated the
    /// same as any other transfer failure: abort, report, clean up.
    #[error("artifact transfer interrupted: {message}")]
    Interrupted { message: String },

    /// The output name or destination descriptor was unusable.
    #[error("invalid artifact transfer argument: {message}")]
    InvalidArgument { message: String },
}

/// Publish-time failure classification.
///
/// Converted into a failed [`PublishResult`](crate::core::PublishResult)
/// at the reporting step; nothing here crosses the publisher's public
/// boundary as a raw error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// No active job state for this build context. State corruption: the
    /// SCM integration should have populated the model before the build
    /// step ran. Nothing to report against and nothing to clean.
    #[error("no active job state found for this build")]
    MissingJobState,

    /// The number of configured output locations does not match the
    /// number of output artifacts the orchestrator job declares.
    #[error(
        "Error: number of output locations and number of pipeline outputs are \
         different. Number of outputs: {configured}, Number of pipeline artifacts: \
         {expected}. The number of build artifacts should match the number of \
         output artifacts specified"
    )]
    OutputCountMismatch { configured: usize, expected: usize },

    /// An artifact transfer raised. Remaining transfers are abandoned;
    /// completed ones are not rolled back.
    #[error("{0}")]
    Transfer(#[from] TransferError),

    /// The transfer worker completed but reported the artifact as not
    /// transferred.
    #[error("failed to transfer output '{output}': {reason}")]
    TransferRejected { output: String, reason: String },
}

/// Configuration-intake failure. Raised once at construction time, never
/// at publish time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputConfigError {
    /// An output-location entry did not have the expected shape.
    #[error("malformed output location entry: {message}")]
    MalformedEntry { message: String },

    /// More output locations configured than the orchestrator supports.
    #[error("too many output locations configured: {configured} (maximum {max})")]
    TooManyOutputs { configured: usize, max: usize },
}
