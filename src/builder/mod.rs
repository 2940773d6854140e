//! Builder API for ergonomic table and machine construction.
//!
//! This module provides fluent builders and macros for declaring kinds,
//! transition tables and state machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod table;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use table::TransitionTableBuilder;

use crate::core::Kind;
use crate::dispatch::Transition;

/// Create a row with no handler.
///
/// # Example
///
/// ```
/// use switchyard::builder::silent_transition;
/// use switchyard::kinds;
///
/// kinds! {
///     struct Red;
///     struct Green;
///     struct Timer;
/// }
///
/// let row = silent_transition::<Red, Timer, Green, ()>();
/// assert_eq!(row.to().name(), "Green");
/// ```
pub fn silent_transition<S: Kind, E: Kind, T: Kind, Env: 'static>() -> Transition<Env> {
    Transition::new::<S, E, T>(|_, _| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KindId;

    crate::kinds! {
        struct Start;
        struct End;
        struct Go;
    }

    #[test]
    fn silent_transition_builds() {
        let row = silent_transition::<Start, Go, End, ()>();

        assert!(row.matches(KindId::of::<Start>(), KindId::of::<Go>()));
        assert_eq!(row.to(), KindId::of::<End>());
    }

    #[test]
    fn silent_transition_moves_machine() {
        let mut machine = StateMachineBuilder::<()>::new()
            .initial::<Start>()
            .add_transition(silent_transition::<Start, Go, End, ()>())
            .build()
            .unwrap();
        machine.start();

        machine.process_event(&Go);

        assert!(machine.is_in::<End>());
    }
}
