//! Job state storage
//!
//! [`JobStateSlot`] holds the one model a build context owns. The SCM
//! integration populates it before the build step runs and the publisher
//! clears it after reporting. [`JobStateRegistry`] keys slots by build id
//! so unrelated concurrent builds can add and remove their own entries
//! without coordinating.

use crate::core::job_state::JobStateModel;
use crate::core::traits::JobStateStore;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory holder for one build's [`JobStateModel`].
#[derive(Default)]
pub struct JobStateSlot {
    model: std::sync::Mutex<Option<Arc<RwLock<JobStateModel>>>>,
}

impl JobStateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the model for this build. Replaces any previous one; at
    /// most one model is live per build context.
    pub fn set_model(&self, model: JobStateModel) {
        let mut slot = self.model.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(RwLock::new(model)));
    }
}

impl JobStateStore for JobStateSlot {
    fn model(&self) -> Option<Arc<RwLock<JobStateModel>>> {
        let slot = self.model.lock().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    fn remove_model(&self) {
        let mut slot = self.model.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

/// Process-wide registry of job state slots, keyed by build id.
///
/// Each build touches only its own entry; the map itself is safe under
/// concurrent use by unrelated builds.
#[derive(Default)]
pub struct JobStateRegistry {
    slots: DashMap<Uuid, Arc<JobStateSlot>>,
}

impl JobStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for the given build, created on first use.
    pub fn slot(&self, build_id: Uuid) -> Arc<JobStateSlot> {
        self.slots
            .entry(build_id)
            .or_insert_with(|| Arc::new(JobStateSlot::new()))
            .clone()
    }

    /// Drop the build's slot entirely, model included.
    pub fn remove(&self, build_id: Uuid) {
        self.slots.remove(&build_id);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
