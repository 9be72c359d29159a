//! Membership set over a [`PooledList`] with linear-scan dedup.

use crate::collections::error::CollectionError;
use crate::collections::list::{Iter, PooledList};

/// Fixed-capacity set. Membership is decided by `PartialEq` with a linear
/// scan, so every operation is O(n).
#[derive(Debug)]
pub struct Set<T> {
    list: PooledList<T>,
}

impl<T: PartialEq> Set<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            list: PooledList::with_capacity(capacity)?,
        })
    }

    /// Add `payload` unless an equal element is already present.
    ///
    /// Returns `true` when the element was inserted.
    pub fn add(&mut self, payload: T) -> Result<bool, CollectionError> {
        if self.contains(&payload) {
            return Ok(false);
        }
        self.list.push_back(payload)?;
        Ok(true)
    }

    pub fn contains(&self, payload: &T) -> bool {
        self.list.find(|item| item == payload).is_some()
    }

    /// Remove the element equal to `payload`, if any.
    pub fn remove(&mut self, payload: &T) -> Option<T> {
        let handle = self.list.find(|item| item == payload)?;
        self.list.remove(handle).ok()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}
