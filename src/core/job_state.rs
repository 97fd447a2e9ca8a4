//! Per-build job state for the orchestrator binding
//!
//! One [`JobStateModel`] is populated by the SCM integration before the
//! build step runs, read during publish, and cleared after the result is
//! reported. At most one live model exists per build context.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of the pipeline stage invoking this build. Used only to
/// select the default failure message when the upstream step did not
/// succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCategory {
    Build,
    Test,
    Other,
}

impl ActionCategory {
    /// Failure message reported when the upstream build/test step failed
    /// and no more specific error surfaced later.
    pub fn default_failure_message(&self) -> &'static str {
        match self {
            Self::Build => "Build failed",
            Self::Test => "Tests failed",
            Self::Other => "Failed",
        }
    }
}

/// How produced outputs are packaged before upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionMode {
    #[default]
    None,
    Zip,
    Tar,
    TarGz,
}

/// Credentials and connection settings for talking to the orchestrator
/// and the artifact destination. The secret key is never logged or
/// Debug-printed.
#[derive(Debug, Clone)]
pub struct JobCredentials {
    pub access_key: String,
    pub secret_key: SecretString,
    pub region: String,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
}

/// One output artifact the orchestrator job expects, positionally matched
/// to a configured output declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// Artifact name as the orchestrator knows it.
    pub name: String,

    /// Destination the compressed output is uploaded to.
    pub location: String,
}

/// The orchestrator job this build is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorJob {
    pub id: Uuid,
    pub output_artifacts: Vec<ArtifactDescriptor>,
}

/// Per-build, context-scoped record of the orchestrator binding.
///
/// `job` is `None` for builds triggered manually with no pipeline job to
/// satisfy; the publisher short-circuits those without reporting.
#[derive(Debug, Clone)]
pub struct JobStateModel {
    job: Option<OrchestratorJob>,
    action_id: Uuid,
    category: ActionCategory,
    credentials: JobCredentials,
    compression: CompressionMode,
}

impl JobStateModel {
    pub fn new(
        job: Option<OrchestratorJob>,
        action_id: Uuid,
        category: ActionCategory,
        credentials: JobCredentials,
        compression: CompressionMode,
    ) -> Self {
        Self {
            job,
            action_id,
            category,
            credentials,
            compression,
        }
    }

    pub fn job(&self) -> Option<&OrchestratorJob> {
        self.job.as_ref()
    }

    pub fn action_id(&self) -> Uuid {
        self.action_id
    }

    pub fn category(&self) -> ActionCategory {
        self.category
    }

    pub fn credentials(&self) -> &JobCredentials {
        &self.credentials
    }

    pub fn compression(&self) -> CompressionMode {
        self.compression
    }

    /// Drop the orchestrator job reference. Part of post-report cleanup.
    pub fn clear_job(&mut self) {
        self.job = None;
    }

    pub fn set_compression(&mut self, mode: CompressionMode) {
        self.compression = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> JobCredentials {
        JobCredentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: SecretString::from("hunter2"),
            region: "us-east-1".to_string(),
            proxy_host: None,
            proxy_port: None,
        }
    }

    #[test]
    fn test_default_failure_message_per_category() {
        assert_eq!(ActionCategory::Build.default_failure_message(), "Build failed");
        assert_eq!(ActionCategory::Test.default_failure_message(), "Tests failed");
        assert_eq!(ActionCategory::Other.default_failure_message(), "Failed");
    }

    #[test]
    fn test_compression_mode_defaults_to_none() {
        assert_eq!(CompressionMode::default(), CompressionMode::None);
    }

    #[test]
    fn test_clear_job_drops_reference() {
        let job = OrchestratorJob {
            id: Uuid::new_v4(),
            output_artifacts: vec![],
        };
        let mut model = JobStateModel::new(
            Some(job),
            Uuid::new_v4(),
            ActionCategory::Build,
            credentials(),
            CompressionMode::Zip,
        );

        assert!(model.job().is_some());
        model.clear_job();
        model.set_compression(CompressionMode::None);
        assert!(model.job().is_none());
        assert_eq!(model.compression(), CompressionMode::None);
    }

    #[test]
    fn test_secret_key_is_redacted_in_debug() {
        let model = JobStateModel::new(
            None,
            Uuid::new_v4(),
            ActionCategory::Other,
            credentials(),
            CompressionMode::None,
        );

        let dump = format!("{:?}", model);
        assert!(!dump.contains("hunter2"));
    }
}
