//! FIFO queue over a [`PooledList`].

use crate::collections::error::CollectionError;
use crate::collections::list::{Handle, Iter, PooledList};

/// Fixed-capacity FIFO queue.
#[derive(Debug)]
pub struct Queue<T> {
    list: PooledList<T>,
}

impl<T> Queue<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            list: PooledList::with_capacity(capacity)?,
        })
    }

    /// Append at the tail. Fails with `OutOfMemory` when the pool is full.
    pub fn enqueue(&mut self, payload: T) -> Result<Handle, CollectionError> {
        self.list.insert(-1, payload)
    }

    /// Take the head element. Fails with `Empty` on an empty queue.
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.list.first().and_then(|h| self.list.get(h))
    }

    pub fn back(&self) -> Option<&T> {
        self.list.last().and_then(|h| self.list.get(h))
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

    pub fn is_full(&self) -> bool {
        self.list.available() == 0
    }

    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}
