//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::table::TransitionTableBuilder;
use crate::config::{DispatchPolicy, HistoryPolicy, MachineConfig};
use crate::core::{Kind, KindId};
use crate::dispatch::{StateMachine, Transition, TransitionTable};
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// Rows declared on the builder come after the rows of a table supplied
/// through [`table`](Self::table).
pub struct StateMachineBuilder<Env = ()> {
    initial: Option<KindId>,
    shared: Option<Arc<TransitionTable<Env>>>,
    rows: TransitionTableBuilder<Env>,
    env: Env,
    config: MachineConfig,
}

impl<Env: Default + 'static> StateMachineBuilder<Env> {
    /// Create a new builder with a default environment.
    pub fn new() -> Self {
        Self::with_env(Env::default())
    }
}

impl<Env: 'static> StateMachineBuilder<Env> {
    /// Create a new builder around the given environment.
    pub fn with_env(env: Env) -> Self {
        Self {
            initial: None,
            shared: None,
            rows: TransitionTableBuilder::new(),
            env,
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state kind (required).
    pub fn initial<I: Kind>(mut self) -> Self {
        self.initial = Some(KindId::of::<I>());
        self
    }

    /// Replace the environment handed to handlers.
    pub fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// Use an existing table, possibly shared with other machines.
    pub fn table(mut self, table: impl Into<Arc<TransitionTable<Env>>>) -> Self {
        self.shared = Some(table.into());
        self
    }

    /// Declare a row: in state `S`, event `E` moves to `T` and runs `handler`.
    pub fn transition<S: Kind, E: Kind, T: Kind>(
        mut self,
        handler: impl Fn(&E::Base, &mut Env) + Send + Sync + 'static,
    ) -> Self {
        self.rows = self.rows.transition::<S, E, T>(handler);
        self
    }

    /// Declare a row with no handler.
    pub fn silent<S: Kind, E: Kind, T: Kind>(mut self) -> Self {
        self.rows = self.rows.silent::<S, E, T>();
        self
    }

    /// Add a pre-built row.
    pub fn add_transition(mut self, transition: Transition<Env>) -> Self {
        self.rows = self.rows.add_transition(transition);
        self
    }

    /// Add several pre-built rows, in order.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<Env>>) -> Self {
        self.rows = self.rows.transitions(transitions);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.config.dispatch = policy;
        self
    }

    pub fn history(mut self, policy: HistoryPolicy) -> Self {
        self.config.history = policy;
        self
    }

    /// Build the state machine.
    /// Returns an error if the initial state is missing or the config is invalid.
    pub fn build(self) -> Result<StateMachine<Env>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        self.config.validate()?;

        let declared = self.rows.build();
        let table = match self.shared {
            Some(shared) if declared.is_empty() => shared,
            Some(shared) => Arc::new(
                shared
                    .iter()
                    .chain(declared.iter())
                    .cloned()
                    .collect::<TransitionTable<Env>>(),
            ),
            None => Arc::new(declared),
        };

        Ok(StateMachine::from_parts(initial, table, self.env, self.config))
    }
}

impl<Env: Default + 'static> Default for StateMachineBuilder<Env> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Lifecycle;

    crate::kinds! {
        struct Closed;
        struct Opened;
        struct Locked;
        struct Open;
        struct Close;
        struct Lock;
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = StateMachineBuilder::<()>::new()
            .silent::<Closed, Open, Opened>()
            .build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_zero_history_bound() {
        let result = StateMachineBuilder::<()>::new()
            .initial::<Closed>()
            .history(HistoryPolicy::Bounded(0))
            .build();

        assert!(matches!(result, Err(BuildError::InvalidHistoryLimit)));
    }

    #[test]
    fn builder_accepts_largest_history_bound() {
        let config: MachineConfig =
            serde_json::from_str(r#"{"history": {"bounded": 18446744073709551615}}"#).unwrap();
        assert_eq!(config.history, HistoryPolicy::Bounded(usize::MAX));

        let mut machine = StateMachineBuilder::<()>::new()
            .initial::<Closed>()
            .config(config)
            .silent::<Closed, Open, Opened>()
            .build()
            .unwrap();
        machine.start();
        machine.process_event(&Open);

        assert!(machine.is_in::<Opened>());
        assert_eq!(machine.history().map(|history| history.len()), Some(1));
    }

    #[test]
    fn builder_allows_empty_table() {
        let machine = StateMachineBuilder::<()>::new()
            .initial::<Closed>()
            .build()
            .unwrap();

        assert!(machine.table().is_empty());
        assert_eq!(machine.lifecycle(), Lifecycle::Uninitialized);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let mut machine = StateMachineBuilder::<Vec<&'static str>>::new()
            .initial::<Closed>()
            .transition::<Closed, Open, Opened>(|_, log| log.push("opened"))
            .transition::<Opened, Close, Closed>(|_, log| log.push("closed"))
            .silent::<Closed, Lock, Locked>()
            .build()
            .unwrap();

        machine.start();
        machine.process_event(&Open);
        machine.process_event(&Close);
        machine.process_event(&Lock);

        assert!(machine.is_in::<Locked>());
        assert_eq!(machine.env(), &vec!["opened", "closed"]);
    }

    #[test]
    fn shared_table_is_reused_without_copy() {
        let table = Arc::new(
            TransitionTable::<()>::builder()
                .silent::<Closed, Open, Opened>()
                .build(),
        );

        let machine = StateMachineBuilder::<()>::new()
            .initial::<Closed>()
            .table(Arc::clone(&table))
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(&machine.shared_table(), &table));
    }

    #[test]
    fn declared_rows_follow_shared_rows() {
        let table = TransitionTable::<()>::builder()
            .silent::<Closed, Open, Opened>()
            .build();

        let machine = StateMachineBuilder::<()>::new()
            .initial::<Closed>()
            .table(table)
            .silent::<Opened, Close, Closed>()
            .build()
            .unwrap();

        let sources: Vec<KindId> = machine.table().iter().map(Transition::from).collect();
        assert_eq!(sources, vec![KindId::of::<Closed>(), KindId::of::<Opened>()]);
    }

    #[test]
    fn config_is_applied() {
        let machine = StateMachineBuilder::<()>::new()
            .initial::<Closed>()
            .dispatch_policy(DispatchPolicy::FirstMatch)
            .history(HistoryPolicy::Bounded(8))
            .build()
            .unwrap();

        assert_eq!(machine.config().dispatch, DispatchPolicy::FirstMatch);
        assert_eq!(machine.history().and_then(|h| h.limit()), Some(8));
    }

    #[test]
    fn with_env_supplies_non_default_env() {
        struct Counter {
            ticks: u32,
        }

        let mut machine = StateMachineBuilder::with_env(Counter { ticks: 10 })
            .initial::<Closed>()
            .transition::<Closed, Open, Closed>(|_, counter| counter.ticks += 1)
            .build()
            .unwrap();

        machine.start();
        machine.process_event(&Open);

        assert_eq!(machine.env().ticks, 11);
    }
}
