//! Build errors for state machine builders.

use thiserror::Error;

/// Errors that can occur when building state machines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial::<State>() before .build()")]
    MissingInitialState,

    #[error("History bound must be at least 1. Use HistoryPolicy::Disabled to keep no history")]
    InvalidHistoryLimit,
}
