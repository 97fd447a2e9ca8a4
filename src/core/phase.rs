//! Phase tracking for one publish invocation
//!
//! The publisher walks a fixed sequence of phases per invocation. The
//! trace is in-memory only and exists for logging and post-mortem
//! assertions; it owns no durable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Phase of the publish-and-report sequence.
///
/// `Transferring` and `SkippedTransfer` are alternatives: a successful
/// build with configured outputs transfers, everything else skips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishPhase {
    Start,
    Validated,
    Transferring,
    SkippedTransfer,
    Reporting,
    Cleaned,
    Done,
}

/// One recorded phase change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: PublishPhase,
    pub to: PublishPhase,
    pub timestamp: DateTime<Utc>,
}

/// Timestamped record of the phases one invocation moved through.
#[derive(Debug, Clone)]
pub struct PhaseTrace {
    current: PublishPhase,
    transitions: Vec<PhaseTransition>,
}

impl PhaseTrace {
    pub fn new() -> Self {
        Self {
            current: PublishPhase::Start,
            transitions: Vec::new(),
        }
    }

    /// Move to the next phase, recording and logging the transition.
    pub fn advance(&mut self, to: PublishPhase) {
        debug!(from = ?self.current, to = ?to, "publish phase transition");
        self.transitions.push(PhaseTransition {
            from: self.current,
            to,
            timestamp: Utc::now(),
        });
        self.current = to;
    }

    pub fn current(&self) -> PublishPhase {
        self.current
    }

    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }
}

impl Default for PhaseTrace {
    fn default() -> Self {
        Self::new()
    }
}
