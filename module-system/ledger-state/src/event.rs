use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An event emitted by a module call: a human readable key and a borsh encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: String,
    value: Vec<u8>,
}

impl Event {
    /// Creates an event from already encoded bytes.
    pub fn new(key: &str, value: Vec<u8>) -> Self {
        Self {
            key: key.to_owned(),
            value,
        }
    }

    /// Creates an event by borsh encoding `value`.
    pub fn typed<E: BorshSerialize>(key: &str, value: &E) -> Self {
        let mut encoded = Vec::new();
        value
            .serialize(&mut encoded)
            .unwrap_or_else(|e| panic!("Unable to serialize event {key}: {e:?}"));
        Self::new(key, encoded)
    }

    /// The event key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The encoded payload.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Decodes the payload into the module event type.
    pub fn decode<E: BorshDeserialize>(&self) -> std::io::Result<E> {
        E::try_from_slice(&self.value)
    }
}
