//! Cached query results with supersede semantics.
//!
//! Each read starts by taking a [`Ticket`] from the slot it will fill. Taking
//! a newer ticket (a key change or a refetch) or invalidating the slot bumps
//! its generation, and [`Cached::settle`] refuses results carrying an older
//! one. A slow response for a section the visitor already left is dropped
//! instead of overwriting the newer section's data.

use std::fmt::Debug;

use tracing::debug;

/// Proof that a fetch was started against a particular generation of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    generation: u64,
}

impl<K> Ticket<K> {
    /// The key the fetch was started for.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The generation the fetch was started in.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One cached query result, keyed by `K`.
#[derive(Debug, Clone)]
pub struct Cached<K, T> {
    key: Option<K>,
    generation: u64,
    value: Option<T>,
    stale: bool,
}

impl<K, T> Default for Cached<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            generation: 0,
            value: None,
            stale: true,
        }
    }
}

impl<K: Clone + PartialEq + Debug, T> Cached<K, T> {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `key`, superseding any fetch already in flight.
    ///
    /// Switching to a different key drops the value cached for the old one.
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.generation += 1;
        if self.key.as_ref() != Some(&key) {
            self.value = None;
            self.stale = true;
            self.key = Some(key.clone());
        }
        Ticket {
            key,
            generation: self.generation,
        }
    }

    /// Store the result of a fetch if its ticket is still current.
    ///
    /// Returns `false` when the result was discarded.
    pub fn settle(&mut self, ticket: Ticket<K>, value: T) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding result for {:?} from generation {} (current {})",
                ticket.key, ticket.generation, self.generation
            );
            return false;
        }
        self.value = Some(value);
        self.stale = false;
        true
    }

    /// Mark the cached value out of date and supersede in-flight fetches.
    ///
    /// The value stays readable until a refetch settles.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.stale = true;
    }

    /// The cached value, if any fetch for the current key has settled.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The key of the most recent fetch.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// True until a current fetch settles, and again after [`invalidate`](Self::invalidate).
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
