//! Transition rows and the table they form.

use crate::builder::TransitionTableBuilder;
use crate::core::{Kind, KindId};
use std::any::{type_name, Any};
use std::fmt;
use std::slice;
use std::sync::Arc;
use tracing::warn;

/// Type-erased transition handler.
///
/// Receives the event as `&dyn Any` and downcasts it back to the kind the
/// row was declared with.
pub type Handler<Env> = Arc<dyn Fn(&dyn Any, &mut Env) + Send + Sync>;

/// One row of a transition table: `(from, event) -> (to, handler)`.
///
/// Rows are immutable once built.
pub struct Transition<Env = ()> {
    from: KindId,
    event: KindId,
    to: KindId,
    handler: Handler<Env>,
}

impl<Env: 'static> Transition<Env> {
    /// Row moving from state `S` to state `T` on event `E`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use switchyard::dispatch::Transition;
    /// use switchyard::core::KindId;
    /// use switchyard::kinds;
    ///
    /// kinds! {
    ///     struct Locked;
    ///     struct Unlocked;
    ///     struct Coin;
    /// }
    ///
    /// let row = Transition::<()>::new::<Locked, Coin, Unlocked>(|_coin, _env| {});
    /// assert!(row.matches(KindId::of::<Locked>(), KindId::of::<Coin>()));
    /// assert_eq!(row.to(), KindId::of::<Unlocked>());
    /// ```
    pub fn new<S: Kind, E: Kind, T: Kind>(
        handler: impl Fn(&E::Base, &mut Env) + Send + Sync + 'static,
    ) -> Self {
        Self::between::<E>(KindId::of::<S>(), KindId::of::<T>(), handler)
    }

    /// Row on event `E` between two already-resolved state identities.
    pub fn between<E: Kind>(
        from: KindId,
        to: KindId,
        handler: impl Fn(&E::Base, &mut Env) + Send + Sync + 'static,
    ) -> Self {
        let handler: Handler<Env> = Arc::new(move |event: &dyn Any, env: &mut Env| {
            match event.downcast_ref::<E::Base>() {
                Some(event) => handler(event, env),
                None => warn!(
                    expected = type_name::<E::Base>(),
                    "event payload does not match the row's event kind, handler skipped"
                ),
            }
        });

        Self {
            from,
            event: KindId::of::<E>(),
            to,
            handler,
        }
    }
}

impl<Env> Transition<Env> {
    pub fn from(&self) -> KindId {
        self.from
    }

    pub fn event(&self) -> KindId {
        self.event
    }

    pub fn to(&self) -> KindId {
        self.to
    }

    /// Whether this row applies to `event` while in state `current` (pure).
    pub fn matches(&self, current: KindId, event: KindId) -> bool {
        self.from == current && self.event == event
    }

    pub(crate) fn fire(&self, event: &dyn Any, env: &mut Env) {
        (self.handler)(event, env);
    }
}

impl<Env> Clone for Transition<Env> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            event: self.event,
            to: self.to,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<Env> fmt::Debug for Transition<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl<Env> fmt::Display for Transition<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.event, self.to)
    }
}

/// Ordered, read-only list of transition rows.
///
/// Row order is significant: dispatch visits rows in declaration order.
pub struct TransitionTable<Env = ()> {
    rows: Vec<Transition<Env>>,
}

impl<Env: 'static> TransitionTable<Env> {
    /// Start declaring a table.
    pub fn builder() -> TransitionTableBuilder<Env> {
        TransitionTableBuilder::new()
    }
}

impl<Env> TransitionTable<Env> {
    pub(crate) fn from_rows(rows: Vec<Transition<Env>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transition<Env>] {
        &self.rows
    }

    pub fn iter(&self) -> slice::Iter<'_, Transition<Env>> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<Env> FromIterator<Transition<Env>> for TransitionTable<Env> {
    fn from_iter<I: IntoIterator<Item = Transition<Env>>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}

impl<'a, Env> IntoIterator for &'a TransitionTable<Env> {
    type Item = &'a Transition<Env>;
    type IntoIter = slice::Iter<'a, Transition<Env>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<Env> Clone for TransitionTable<Env> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

impl<Env> fmt::Debug for TransitionTable<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rows).finish()
    }
}

impl<Env> fmt::Display for TransitionTable<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            writeln!(f, "{index:>3}: {row}")?;
        }
        Ok(())
    }
}
