//! Transition table and the dispatching state machine.
//!
//! # Key Concepts
//!
//! - **Transitions**: immutable `(from, event) -> (to, handler)` rows
//! - **Transition table**: rows in declaration order, read-only once built
//! - **State machine**: current state plus the dispatch scan over a table
//!
//! Handlers are stored type-erased and recover their event through
//! `Any::downcast_ref`, so a row can only ever be called with the event
//! kind it was declared for.

mod machine;
mod transition;

pub use machine::{Lifecycle, StateMachine};
pub use transition::{Handler, Transition, TransitionTable};
