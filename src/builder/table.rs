//! Builder for declaring transition tables.

use crate::core::Kind;
use crate::dispatch::{Transition, TransitionTable};

/// Builder for declaring a transition table row by row.
///
/// Rows keep the order they are declared in.
pub struct TransitionTableBuilder<Env = ()> {
    rows: Vec<Transition<Env>>,
}

impl<Env: 'static> TransitionTableBuilder<Env> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Declare a row: in state `S`, event `E` moves to `T` and runs `handler`.
    pub fn transition<S: Kind, E: Kind, T: Kind>(
        mut self,
        handler: impl Fn(&E::Base, &mut Env) + Send + Sync + 'static,
    ) -> Self {
        self.rows.push(Transition::new::<S, E, T>(handler));
        self
    }

    /// Declare a row with no handler.
    pub fn silent<S: Kind, E: Kind, T: Kind>(self) -> Self {
        self.transition::<S, E, T>(|_, _| {})
    }

    /// Add a pre-built row.
    pub fn add_transition(mut self, transition: Transition<Env>) -> Self {
        self.rows.push(transition);
        self
    }

    /// Add several pre-built rows, in order.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<Env>>) -> Self {
        self.rows.extend(transitions);
        self
    }

    /// Freeze the rows into a table.
    pub fn build(self) -> TransitionTable<Env> {
        TransitionTable::from_rows(self.rows)
    }
}

impl<Env: 'static> Default for TransitionTableBuilder<Env> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KindId;

    crate::kinds! {
        struct Draft;
        struct Review;
        struct Published;
        struct Submit;
        struct Approve;
    }

    #[test]
    fn empty_builder_builds_empty_table() {
        let table = TransitionTableBuilder::<()>::new().build();

        assert!(table.is_empty());
    }

    #[test]
    fn rows_keep_declaration_order() {
        let table = TransitionTableBuilder::<()>::new()
            .silent::<Draft, Submit, Review>()
            .silent::<Review, Approve, Published>()
            .add_transition(Transition::new::<Published, Submit, Review>(|_, _| {}))
            .build();

        let sources: Vec<KindId> = table.iter().map(Transition::from).collect();
        assert_eq!(
            sources,
            vec![
                KindId::of::<Draft>(),
                KindId::of::<Review>(),
                KindId::of::<Published>()
            ]
        );
    }

    #[test]
    fn transitions_appends_in_order() {
        let extra = vec![
            Transition::<()>::new::<Review, Approve, Published>(|_, _| {}),
            Transition::<()>::new::<Review, Submit, Draft>(|_, _| {}),
        ];

        let table = TransitionTable::<()>::builder()
            .silent::<Draft, Submit, Review>()
            .transitions(extra)
            .build();

        let targets: Vec<KindId> = table.iter().map(Transition::to).collect();
        assert_eq!(
            targets,
            vec![
                KindId::of::<Review>(),
                KindId::of::<Published>(),
                KindId::of::<Draft>()
            ]
        );
    }
}
