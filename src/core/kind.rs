//! Kind identities for states and events.
//!
//! Every state and every event a transition table talks about is a Rust
//! type, called a *kind*. The process-wide registry hands out one [`KindId`]
//! per kind the first time it is requested and returns the same value for
//! the rest of the process.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// A type usable as a state or event kind.
///
/// `Base` is the unqualified kind a value stands for. User kinds set
/// `Base = Self`; references forward to the kind they point at, so
/// `KindId::of::<&Play>()` and `KindId::of::<Play>()` are the same identity.
///
/// Implement it with [`kinds!`](crate::kinds) for unit kinds or
/// [`impl_kind!`](crate::impl_kind) for kinds that carry data.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{Kind, KindId};
/// use switchyard::impl_kind;
///
/// struct TrackSelected {
///     number: u32,
/// }
///
/// impl_kind!(TrackSelected);
///
/// let event = TrackSelected { number: 7 };
/// assert_eq!(event.base().number, 7);
/// assert_eq!(KindId::of::<&TrackSelected>(), KindId::of::<TrackSelected>());
/// ```
pub trait Kind {
    /// The unqualified kind.
    type Base: 'static;

    /// Borrow the value as its unqualified kind.
    fn base(&self) -> &Self::Base;
}

impl<K: Kind> Kind for &K {
    type Base = K::Base;

    fn base(&self) -> &Self::Base {
        (**self).base()
    }
}

impl<K: Kind> Kind for &mut K {
    type Base = K::Base;

    fn base(&self) -> &Self::Base {
        (**self).base()
    }
}

/// Stable identity of a kind.
///
/// Identities are allocated from a monotonically increasing counter, so
/// they are totally ordered by first use. They are only meaningful inside
/// the process that allocated them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindId(u64);

impl KindId {
    /// Identity held by a machine that has not been started.
    ///
    /// The registry never allocates it, so no transition row can match it.
    pub const UNSET: KindId = KindId(0);

    /// Identity of kind `K`, allocating it on first use.
    pub fn of<K: Kind>() -> Self {
        registry().identify::<K::Base>()
    }

    /// Whether this is [`KindId::UNSET`].
    pub fn is_unset(self) -> bool {
        self == Self::UNSET
    }

    /// Raw counter value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Short type name of the kind, for display and logging.
    pub fn name(self) -> &'static str {
        if self.is_unset() {
            return "<unset>";
        }
        registry()
            .names
            .get(&self)
            .map(|name| *name)
            .unwrap_or("<unknown>")
    }
}

/// Identity of kind `K`. Shorthand for [`KindId::of`].
pub fn identity_of<K: Kind>() -> KindId {
    KindId::of::<K>()
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({}:{})", self.0, self.name())
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct Registry {
    ids: DashMap<TypeId, KindId>,
    names: DashMap<KindId, &'static str>,
    next: AtomicU64,
}

impl Registry {
    fn new() -> Self {
        Self {
            ids: DashMap::new(),
            names: DashMap::new(),
            next: AtomicU64::new(1),
        }
    }

    fn identify<T: 'static>(&self) -> KindId {
        let type_id = TypeId::of::<T>();
        if let Some(id) = self.ids.get(&type_id) {
            return *id;
        }

        // The entry holds its shard lock until the id is stored, so racing
        // first lookups of one kind agree on a single allocation.
        *self.ids.entry(type_id).or_insert_with(|| {
            let id = KindId(self.next.fetch_add(1, Ordering::Relaxed));
            self.names.insert(id, short_name(type_name::<T>()));
            id
        })
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

fn short_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
