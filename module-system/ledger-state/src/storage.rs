use std::fmt::Display;
use std::sync::Arc;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::Prefix;

/// `Key` type for the [`Storage`].
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    BorshDeserialize,
    BorshSerialize,
)]
pub struct StorageKey {
    key: Arc<Vec<u8>>,
}

impl StorageKey {
    /// Creates a new [`StorageKey`] that combines a prefix and a borsh encoded key.
    pub fn new<K: BorshSerialize + ?Sized>(prefix: &Prefix, key: &K) -> Self {
        let mut full_key = Vec::with_capacity(prefix.len());
        full_key.extend_from_slice(prefix.as_bytes());
        // Writing into a `Vec` can't fail, only a broken `BorshSerialize` impl can.
        key.serialize(&mut full_key)
            .unwrap_or_else(|e| panic!("Unable to serialize storage key {e:?}"));

        Self {
            key: Arc::new(full_key),
        }
    }

    /// Creates a new [`StorageKey`] made only of the prefix.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self {
            key: Arc::new(prefix.as_bytes().to_vec()),
        }
    }

    /// Returns the raw bytes of the key.
    pub fn key(&self) -> Arc<Vec<u8>> {
        self.key.clone()
    }
}

impl AsRef<[u8]> for StorageKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl From<Vec<u8>> for StorageKey {
    fn from(key: Vec<u8>) -> Self {
        Self { key: Arc::new(key) }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.key.as_ref()))
    }
}

/// A serialized value suitable for storing. Internally uses an [`Arc<Vec<u8>>`] for cheap cloning.
#[derive(
    Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default,
)]
pub struct StorageValue {
    value: Arc<Vec<u8>>,
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

impl StorageValue {
    /// Create a new storage value by serializing the input with borsh.
    pub fn new<V: BorshSerialize>(value: &V) -> Self {
        let mut encoded_value = Vec::new();
        value
            .serialize(&mut encoded_value)
            .unwrap_or_else(|e| panic!("Unable to serialize storage value {e:?}"));

        Self {
            value: Arc::new(encoded_value),
        }
    }

    /// Get the bytes of this value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Decodes the value with borsh.
    pub fn decode<V: BorshDeserialize>(&self) -> std::io::Result<V> {
        V::try_from_slice(&self.value)
    }
}

/// Writes accumulated by a [`crate::StateCheckpoint`], sorted by key.
/// A `None` value marks a deletion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderedWrites {
    /// The writes in key order.
    pub ordered_writes: Vec<(StorageKey, Option<StorageValue>)>,
}

impl OrderedWrites {
    /// Returns `true` if there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.ordered_writes.is_empty()
    }
}

/// An interface for storing and retrieving values in the storage.
pub trait Storage: Clone {
    /// The runtime config for this storage instance.
    type RuntimeConfig;

    /// Creates the storage from its configuration.
    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error>;

    /// Returns the value corresponding to the key or None if key is absent.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Commits state changes to the storage.
    fn commit(&self, writes: &OrderedWrites) -> Result<(), anyhow::Error>;

    /// Indicates if storage is empty or not.
    /// Useful during initialization
    fn is_empty(&self) -> bool;
}

// Used only in tests.
#[cfg(test)]
impl From<&'static str> for StorageKey {
    fn from(key: &'static str) -> Self {
        Self {
            key: Arc::new(key.as_bytes().to_vec()),
        }
    }
}

// Used only in tests.
#[cfg(test)]
impl From<&'static str> for StorageValue {
    fn from(value: &'static str) -> Self {
        Self {
            value: Arc::new(value.as_bytes().to_vec()),
        }
    }
}
