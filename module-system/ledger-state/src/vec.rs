use std::marker::PhantomData;

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::{Prefix, Storage, WorkingSet};

/// An append-friendly vector stored element by element.
///
/// The length lives under index key `0`, element `i` under index key `i + 1`.
#[derive(Debug, PartialEq, Eq, Clone, BorshDeserialize, BorshSerialize)]
pub struct StateVec<V> {
    _phantom: PhantomData<V>,
    prefix: Prefix,
}

/// Error type for `StateVec` get method.
#[derive(Debug, Error)]
pub enum StateVecError {
    /// The index is not smaller than the length.
    #[error("Index out of bounds for index: {0}")]
    IndexOutOfBounds(usize),
    /// The length covers the index but the element is missing.
    #[error("Value not found for prefix: {0} and index: {1}")]
    MissingValue(Prefix, usize),
}

impl<V> StateVec<V>
where
    V: BorshSerialize + BorshDeserialize,
{
    /// Creates a new [`StateVec`] with the given prefix.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            _phantom: PhantomData,
            prefix,
        }
    }

    /// Returns the prefix used when this [`StateVec`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn set_len<S: Storage>(&self, length: usize, working_set: &mut WorkingSet<S>) {
        working_set.set_value(self.prefix(), &index_key(0), &(length as u64));
    }

    /// Sets a value in the [`StateVec`].
    /// If the index is out of bounds, returns an error.
    /// To push a value to the end of the StateVec, use [`StateVec::push`].
    pub fn set<S: Storage>(
        &self,
        index: usize,
        value: &V,
        working_set: &mut WorkingSet<S>,
    ) -> Result<(), StateVecError> {
        let len = self.len(working_set);

        if index < len {
            working_set.set_value(self.prefix(), &index_key(index + 1), value);
            Ok(())
        } else {
            Err(StateVecError::IndexOutOfBounds(index))
        }
    }

    /// Returns the value for the given index.
    pub fn get<S: Storage>(&self, index: usize, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.get_value(self.prefix(), &index_key(index + 1))
    }

    /// Returns the value for the given index.
    /// If the index is out of bounds, returns an error.
    /// If the value is absent, returns an error.
    pub fn get_or_err<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateVecError> {
        let len = self.len(working_set);

        if index < len {
            self.get(index, working_set)
                .ok_or_else(|| StateVecError::MissingValue(self.prefix().clone(), index))
        } else {
            Err(StateVecError::IndexOutOfBounds(index))
        }
    }

    /// Returns the length of the [`StateVec`].
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> usize {
        working_set
            .get_value::<_, u64>(self.prefix(), &index_key(0))
            .unwrap_or_default() as usize
    }

    /// Returns `true` if the [`StateVec`] holds no element.
    pub fn is_empty<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> bool {
        self.len(working_set) == 0
    }

    /// Pushes a value to the end of the [`StateVec`] and returns its index.
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) -> usize {
        let len = self.len(working_set);

        working_set.set_value(self.prefix(), &index_key(len + 1), value);
        self.set_len(len + 1, working_set);
        len
    }

    /// Pops a value from the end of the [`StateVec`] and returns it.
    pub fn pop<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        let len = self.len(working_set);

        if len > 0 {
            let elem = working_set.remove_value(self.prefix(), &index_key(len));
            self.set_len(len - 1, working_set);
            elem
        } else {
            None
        }
    }

    /// Returns every element in index order.
    pub fn iter_all<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Vec<V> {
        let len = self.len(working_set);
        (0..len)
            .filter_map(|index| self.get(index, working_set))
            .collect()
    }
}

fn index_key(index: usize) -> [u8; 8] {
    (index as u64).to_be_bytes()
}
