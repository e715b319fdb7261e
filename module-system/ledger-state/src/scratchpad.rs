use std::collections::HashMap;
use std::fmt::Debug;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::storage::{OrderedWrites, StorageKey, StorageValue};
use crate::{Event, Prefix, Storage};

/// Accumulates writes on top of the underlying storage.
struct Delta<S: Storage> {
    inner: S,
    cache: HashMap<StorageKey, Option<StorageValue>>,
}

/// A wrapper that adds additional writes on top of an underlying Delta.
/// These are handy for implementing operations that might revert on top of an existing
/// checkpoint, without running the risk that the whole checkpoint will be discarded if some particular
/// operation reverts.
struct RevertableDelta<S: Storage> {
    /// The inner (non-revertable) delta
    inner: Delta<S>,
    /// A cache containing the most recent values written. Reads are first checked
    /// against this map, and if the key is not present, the underlying Delta is checked.
    writes: HashMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> Debug for RevertableDelta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevertableDelta")
            .field("inner", &self.inner)
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

/// This structure is responsible for storing the writes of every committed call
/// and is obtained from the `WorkingSet` by using either the `checkpoint` or `revert` method.
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates an empty checkpoint on top of `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a revertable [`WorkingSet`] on top of this checkpoint.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            delta: self.delta.get_revertable_wrapper(),
            events: Default::default(),
        }
    }

    /// Drains the accumulated writes in key order, ready to be committed to the storage.
    pub fn freeze(&mut self) -> OrderedWrites {
        self.delta.freeze()
    }
}

/// This structure contains the writes and the events collected during the execution of a call.
/// There are two ways to convert it into a StateCheckpoint:
/// 1. By using the checkpoint() method, where all the changes are added to the underlying StateCheckpoint.
/// 2. By using the revert method, where the most recent changes and events are dropped and the previous `StateCheckpoint` is returned.
pub struct WorkingSet<S: Storage> {
    delta: RevertableDelta<S>,
    events: Vec<Event>,
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a working set directly on top of `inner`.
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Keeps the writes made through this working set. Events must be taken beforehand.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.commit(),
        }
    }

    /// Drops the writes and the events made through this working set.
    pub fn revert(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.revert(),
        }
    }

    pub(crate) fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        self.delta.get(key)
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.delta.set(key, value)
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.delta.delete(key)
    }

    /// Appends a typed event, borsh encoded under `key`.
    pub fn add_event<E: BorshSerialize>(&mut self, key: &str, event: &E) {
        self.events.push(Event::typed(key, event));
    }

    /// Takes the events emitted so far, leaving none behind.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The events emitted so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl<S: Storage> WorkingSet<S> {
    pub(crate) fn set_value<K: BorshSerialize + ?Sized, V: BorshSerialize>(
        &mut self,
        prefix: &Prefix,
        storage_key: &K,
        value: &V,
    ) {
        let storage_key = StorageKey::new(prefix, storage_key);
        let storage_value = StorageValue::new(value);
        self.set(storage_key, storage_value);
    }

    pub(crate) fn get_value<K: BorshSerialize + ?Sized, V: BorshDeserialize>(
        &mut self,
        prefix: &Prefix,
        storage_key: &K,
    ) -> Option<V> {
        let storage_key = StorageKey::new(prefix, storage_key);
        self.get_decoded(&storage_key)
    }

    pub(crate) fn get_singleton<V: BorshDeserialize>(&mut self, prefix: &Prefix) -> Option<V> {
        self.get_decoded(&StorageKey::singleton(prefix))
    }

    pub(crate) fn set_singleton<V: BorshSerialize>(&mut self, prefix: &Prefix, value: &V) {
        self.set(StorageKey::singleton(prefix), StorageValue::new(value));
    }

    pub(crate) fn delete_singleton(&mut self, prefix: &Prefix) {
        self.delete(StorageKey::singleton(prefix));
    }

    pub(crate) fn remove_value<K: BorshSerialize + ?Sized, V: BorshDeserialize>(
        &mut self,
        prefix: &Prefix,
        storage_key: &K,
    ) -> Option<V> {
        let storage_key = StorageKey::new(prefix, storage_key);
        let storage_value = self.get_decoded(&storage_key)?;
        self.delete(storage_key);
        Some(storage_value)
    }

    pub(crate) fn delete_value<K: BorshSerialize + ?Sized>(
        &mut self,
        prefix: &Prefix,
        storage_key: &K,
    ) {
        let storage_key = StorageKey::new(prefix, storage_key);
        self.delete(storage_key);
    }

    fn get_decoded<V: BorshDeserialize>(&mut self, storage_key: &StorageKey) -> Option<V> {
        let storage_value = self.get(storage_key)?;

        // It is ok to panic here. Deserialization problem means that something is terribly wrong.
        Some(
            storage_value
                .decode()
                .unwrap_or_else(|e| panic!("Unable to deserialize storage value {e:?}")),
        )
    }
}

impl<S: Storage> RevertableDelta<S> {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        if let Some(value) = self.writes.get(key) {
            return value.clone();
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }
}

impl<S: Storage> RevertableDelta<S> {
    fn commit(self) -> Delta<S> {
        let mut inner = self.inner;

        for (k, v) in self.writes.into_iter() {
            if let Some(v) = v {
                inner.set(k, v);
            } else {
                inner.delete(k);
            }
        }

        inner
    }

    fn revert(self) -> Delta<S> {
        self.inner
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Default::default(),
        }
    }

    fn get_revertable_wrapper(self) -> RevertableDelta<S> {
        RevertableDelta {
            inner: self,
            writes: Default::default(),
        }
    }
}

impl<S: Storage> Debug for Delta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delta")
            .field("cached_writes", &self.cache.len())
            .finish()
    }
}

impl<S: Storage> Delta<S> {
    fn get(&mut self, key: &StorageKey) -> Option<StorageValue> {
        match self.cache.get(key) {
            Some(value) => value.clone(),
            None => self.inner.get(key),
        }
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.cache.insert(key, Some(value));
    }

    fn delete(&mut self, key: StorageKey) {
        self.cache.insert(key, None);
    }

    fn freeze(&mut self) -> OrderedWrites {
        let mut ordered_writes: Vec<_> = std::mem::take(&mut self.cache).into_iter().collect();
        ordered_writes.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));

        OrderedWrites { ordered_writes }
    }
}
