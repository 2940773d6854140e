//! Transition history tracking.
//!
//! A machine configured with a history keeps a record of every row that
//! fired, in firing order. Histories are diagnostic: identities inside them
//! are only meaningful to the process that produced them.

use super::kind::KindId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition row.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{KindId, TransitionRecord};
/// use switchyard::kinds;
/// use chrono::Utc;
///
/// kinds! {
///     struct Idle;
///     struct Busy;
///     struct Work;
/// }
///
/// let record = TransitionRecord {
///     row: 0,
///     from: KindId::of::<Idle>(),
///     event: KindId::of::<Work>(),
///     to: KindId::of::<Busy>(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to.name(), "Busy");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Index of the row in its transition table
    pub row: usize,
    /// The state being transitioned from
    pub from: KindId,
    /// The event that triggered the row
    pub event: KindId,
    /// The state being transitioned to
    pub to: KindId,
    /// When the row fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of fired transitions, optionally bounded.
///
/// A bounded history drops its oldest record once full.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{KindId, TransitionHistory, TransitionRecord};
/// use switchyard::kinds;
/// use chrono::Utc;
///
/// kinds! {
///     struct Red;
///     struct Green;
///     struct Tick;
/// }
///
/// let mut history = TransitionHistory::new();
/// history.record(TransitionRecord {
///     row: 0,
///     from: KindId::of::<Red>(),
///     event: KindId::of::<Tick>(),
///     to: KindId::of::<Green>(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![KindId::of::<Red>(), KindId::of::<Green>()]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
    limit: Option<usize>,
}

impl TransitionHistory {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that keeps at most `limit` records.
    pub fn bounded(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Maximum number of records kept, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a record, evicting the oldest one if the history is full.
    pub fn record(&mut self, record: TransitionRecord) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// States traversed by the retained records.
    ///
    /// The first entry is the `from` state of the oldest record, followed
    /// by the `to` state of each record in order.
    pub fn path(&self) -> Vec<KindId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::kinds! {
        struct Start;
        struct Middle;
        struct End;
        struct Advance;
    }

    fn record(row: usize, from: KindId, to: KindId) -> TransitionRecord {
        TransitionRecord {
            row,
            from,
            event: KindId::of::<Advance>(),
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::new();

        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), None);
    }

    #[test]
    fn path_follows_recorded_order() {
        let (start, middle, end) = (
            KindId::of::<Start>(),
            KindId::of::<Middle>(),
            KindId::of::<End>(),
        );
        let mut history = TransitionHistory::new();
        history.record(record(0, start, middle));
        history.record(record(1, middle, end));

        assert_eq!(history.len(), 2);
        assert_eq!(history.path(), vec![start, middle, end]);
        assert!(history.duration().is_some());
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let (start, middle, end) = (
            KindId::of::<Start>(),
            KindId::of::<Middle>(),
            KindId::of::<End>(),
        );
        let mut history = TransitionHistory::bounded(2);
        history.record(record(0, start, middle));
        history.record(record(1, middle, end));
        history.record(record(2, end, start));

        let rows: Vec<usize> = history.records().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 2]);
        assert_eq!(history.path(), vec![middle, end, start]);
    }

    #[test]
    fn zero_bound_keeps_nothing() {
        let mut history = TransitionHistory::bounded(0);
        history.record(record(0, KindId::of::<Start>(), KindId::of::<End>()));

        assert!(history.is_empty());
    }

    #[test]
    fn unreachable_bound_grows_with_records() {
        let mut history = TransitionHistory::bounded(usize::MAX);
        history.record(record(0, KindId::of::<Start>(), KindId::of::<End>()));

        assert_eq!(history.len(), 1);
        assert_eq!(history.limit(), Some(usize::MAX));
    }

    #[test]
    fn clear_drops_records_but_keeps_limit() {
        let mut history = TransitionHistory::bounded(4);
        history.record(record(0, KindId::of::<Start>(), KindId::of::<End>()));
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(4));
    }

    #[test]
    fn history_serializes_records() {
        let mut history = TransitionHistory::new();
        history.record(record(3, KindId::of::<Start>(), KindId::of::<End>()));

        let json = serde_json::to_string(&history).unwrap();
        let back: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.records().next(), history.records().next());
    }
}
