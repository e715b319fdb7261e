use core::marker::PhantomData;
use std::borrow::Borrow;

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// A container that maps keys to values.
///
/// Keys are borsh encoded and appended to the prefix. Lookups accept any type the key
/// borrows as, as long as it encodes the same way (e.g. `&str` for a `String` key).
#[derive(borsh::BorshDeserialize, borsh::BorshSerialize, Debug, PartialEq, Clone)]
pub struct StateMap<K, V> {
    _phantom: (PhantomData<K>, PhantomData<V>),
    prefix: Prefix,
}

/// Error type for `StateMap` get method.
#[derive(Debug, Error)]
pub enum StateMapError {
    /// The key is absent from the map.
    #[error("Value not found for prefix: {0} and: storage key {1}")]
    MissingValue(Prefix, StorageKey),
}

impl<K, V> StateMap<K, V>
where
    K: BorshSerialize,
    V: BorshSerialize + BorshDeserialize,
{
    /// Creates a new [`StateMap`] with the given prefix.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            _phantom: (PhantomData, PhantomData),
            prefix,
        }
    }

    /// Returns the prefix used when this [`StateMap`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Inserts a key-value pair into the map.
    pub fn set<S, Q>(&self, key: &Q, value: &V, working_set: &mut WorkingSet<S>)
    where
        S: Storage,
        K: Borrow<Q>,
        Q: BorshSerialize + ?Sized,
    {
        working_set.set_value(self.prefix(), key, value)
    }

    /// Returns the value corresponding to the key or None if key is absent in the StateMap.
    pub fn get<S, Q>(&self, key: &Q, working_set: &mut WorkingSet<S>) -> Option<V>
    where
        S: Storage,
        K: Borrow<Q>,
        Q: BorshSerialize + ?Sized,
    {
        working_set.get_value(self.prefix(), key)
    }

    /// Returns the value corresponding to the key or Error if key is absent in the StateMap.
    ///
    /// For reference, check [Self::get].
    pub fn get_or_err<S, Q>(
        &self,
        key: &Q,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateMapError>
    where
        S: Storage,
        K: Borrow<Q>,
        Q: BorshSerialize + ?Sized,
    {
        self.get(key, working_set).ok_or_else(|| {
            StateMapError::MissingValue(self.prefix().clone(), StorageKey::new(self.prefix(), key))
        })
    }

    /// Removes a key from the StateMap, returning the corresponding value (or None if the key is absent).
    pub fn remove<S, Q>(&self, key: &Q, working_set: &mut WorkingSet<S>) -> Option<V>
    where
        S: Storage,
        K: Borrow<Q>,
        Q: BorshSerialize + ?Sized,
    {
        working_set.remove_value(self.prefix(), key)
    }

    /// Deletes a key from the StateMap.
    pub fn delete<S, Q>(&self, key: &Q, working_set: &mut WorkingSet<S>)
    where
        S: Storage,
        K: Borrow<Q>,
        Q: BorshSerialize + ?Sized,
    {
        working_set.delete_value(self.prefix(), key);
    }
}
