//! Machine configuration.
//!
//! Configuration selects how the dispatch scan treats multiple matching
//! rows and whether fired transitions are recorded. It can be set in code
//! through the builder or deserialized from any serde format.

use crate::builder::BuildError;
use crate::core::TransitionHistory;
use serde::{Deserialize, Serialize};

/// How `process_event` scans the transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Visit every row. Each row is tested against the current state as
    /// updated by earlier rows, so one event can fire a chain of rows.
    #[default]
    ScanAll,

    /// Stop after the first matching row.
    FirstMatch,
}

/// Whether and how much transition history a machine keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    #[default]
    Disabled,

    /// Keep the most recent `n` records.
    Bounded(usize),

    Unbounded,
}

impl HistoryPolicy {
    pub(crate) fn new_history(self) -> Option<TransitionHistory> {
        match self {
            Self::Disabled => None,
            Self::Bounded(limit) => Some(TransitionHistory::bounded(limit)),
            Self::Unbounded => Some(TransitionHistory::new()),
        }
    }
}

/// Machine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Dispatch scan policy.
    #[serde(default)]
    pub dispatch: DispatchPolicy,

    /// Transition history policy.
    #[serde(default)]
    pub history: HistoryPolicy,
}

impl MachineConfig {
    /// Check the configuration for values no machine can honour.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.history == HistoryPolicy::Bounded(0) {
            return Err(BuildError::InvalidHistoryLimit);
        }
        Ok(())
    }
}
