//! State machine that dispatches typed events over a transition table.

use crate::config::{DispatchPolicy, MachineConfig};
use crate::core::{Kind, KindId, TransitionHistory, TransitionRecord};
use crate::dispatch::transition::TransitionTable;
use chrono::Utc;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Lifecycle of the machine object itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built but `start()` not yet called
    Uninitialized,

    /// `start()` has been called
    Running,

    /// `stop()` has been called
    Stopped,
}

/// State machine over a shared, read-only transition table.
///
/// The machine owns its current state and the caller's environment `Env`,
/// which every handler receives mutably.
pub struct StateMachine<Env = ()> {
    initial: KindId,
    current: KindId,
    lifecycle: Lifecycle,
    table: Arc<TransitionTable<Env>>,
    env: Env,
    config: MachineConfig,
    history: Option<TransitionHistory>,
    fired_last: usize,
}

impl<Env: 'static> StateMachine<Env> {
    /// Create a machine that will start in state `I`, with default config.
    ///
    /// # Example
    ///
    /// ```rust
    /// use switchyard::{kinds, StateMachine, TransitionTable};
    ///
    /// kinds! {
    ///     struct Off;
    ///     struct On;
    ///     struct Toggle;
    /// }
    ///
    /// let table = TransitionTable::<u32>::builder()
    ///     .transition::<Off, Toggle, On>(|_, presses| *presses += 1)
    ///     .transition::<On, Toggle, Off>(|_, presses| *presses += 1)
    ///     .build();
    ///
    /// let mut machine = StateMachine::new::<Off>(table, 0);
    /// machine.start();
    /// machine.process_event(&Toggle);
    ///
    /// // Both rows fire: Off -> On, then On -> Off on the same event.
    /// assert!(machine.is_in::<Off>());
    /// assert_eq!(*machine.env(), 2);
    /// ```
    pub fn new<I: Kind>(table: impl Into<Arc<TransitionTable<Env>>>, env: Env) -> Self {
        Self::from_parts(KindId::of::<I>(), table.into(), env, MachineConfig::default())
    }
}

impl<Env> StateMachine<Env> {
    pub(crate) fn from_parts(
        initial: KindId,
        table: Arc<TransitionTable<Env>>,
        env: Env,
        config: MachineConfig,
    ) -> Self {
        Self {
            initial,
            current: KindId::UNSET,
            lifecycle: Lifecycle::Uninitialized,
            table,
            env,
            history: config.history.new_history(),
            config,
            fired_last: 0,
        }
    }

    /// Enter the initial state.
    ///
    /// Calling it again resets the current state to the initial state.
    pub fn start(&mut self) {
        self.current = self.initial;
        self.lifecycle = Lifecycle::Running;
        self.fired_last = 0;
        debug!(initial = %self.initial, rows = self.table.len(), "state machine started");
    }

    /// Mark the machine stopped.
    ///
    /// The current state is left as is and later events are still
    /// dispatched.
    pub fn stop(&mut self) {
        self.lifecycle = Lifecycle::Stopped;
        debug!(current = %self.current, "state machine stopped");
    }

    /// Dispatch one event.
    ///
    /// Rows are visited in declaration order. A row fires when its `from`
    /// equals the current state at the moment it is visited and its event
    /// equals the kind of `event`; firing sets the current state to the
    /// row's `to` and then runs its handler. Under
    /// [`DispatchPolicy::ScanAll`] the scan continues after a match, so a
    /// later row can fire from the state an earlier row just entered.
    ///
    /// Before `start()` every event is ignored, whatever rows the table
    /// holds. An event no row matches leaves the machine untouched. A panicking
    /// handler unwinds out of this call after its row's state change.
    pub fn process_event<E: Kind>(&mut self, event: &E) {
        let event_id = KindId::of::<E>();
        let payload: &dyn Any = event.base();
        self.fired_last = 0;

        if self.current.is_unset() {
            debug!(event = %event_id, "machine not started, event ignored");
            return;
        }

        for (index, row) in self.table.iter().enumerate() {
            if !row.matches(self.current, event_id) {
                continue;
            }

            let from = self.current;
            self.current = row.to();
            self.fired_last += 1;
            trace!(row = index, %from, event = %event_id, to = %self.current, "transition fired");

            if let Some(history) = self.history.as_mut() {
                history.record(TransitionRecord {
                    row: index,
                    from,
                    event: event_id,
                    to: self.current,
                    timestamp: Utc::now(),
                });
            }

            row.fire(payload, &mut self.env);

            if self.config.dispatch == DispatchPolicy::FirstMatch {
                break;
            }
        }

        if self.fired_last == 0 {
            debug!(state = %self.current, event = %event_id, "no transition matched");
        }
    }

    /// Current state identity ([`KindId::UNSET`] before `start()`) (pure).
    pub fn current_state(&self) -> KindId {
        self.current
    }

    /// Whether the current state is kind `K` (pure).
    pub fn is_in<K: Kind>(&self) -> bool {
        self.current == KindId::of::<K>()
    }

    /// State entered by `start()` (pure).
    pub fn initial_state(&self) -> KindId {
        self.initial
    }

    /// Current lifecycle phase (pure).
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether `start()` has been called and `stop()` has not (pure).
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Transition table the machine dispatches over (pure).
    pub fn table(&self) -> &TransitionTable<Env> {
        &self.table
    }

    /// Shared handle to the table, for building further machines over it.
    pub fn shared_table(&self) -> Arc<TransitionTable<Env>> {
        Arc::clone(&self.table)
    }

    /// Environment handed to handlers (pure).
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Mutable access to the environment.
    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    /// Consume the machine, returning its environment.
    pub fn into_env(self) -> Env {
        self.env
    }

    /// Configuration the machine was built with (pure).
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Recorded transitions, if history is enabled.
    pub fn history(&self) -> Option<&TransitionHistory> {
        self.history.as_ref()
    }

    /// Number of rows fired by the most recent `process_event`.
    pub fn fired_last(&self) -> usize {
        self.fired_last
    }
}

impl<Env> fmt::Debug for StateMachine<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("lifecycle", &self.lifecycle)
            .field("rows", &self.table.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
