//! Core identity and history types.
//!
//! This module contains the leaves of the engine:
//! - Kind identities via the `Kind` trait and the process-wide registry
//! - Diagnostic history of fired transitions

mod history;
mod kind;

pub use history::{TransitionHistory, TransitionRecord};
pub use kind::{identity_of, Kind, KindId};
