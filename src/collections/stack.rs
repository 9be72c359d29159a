//! LIFO stack over a [`PooledList`].

use crate::collections::error::CollectionError;
use crate::collections::list::{Handle, Iter, PooledList};

/// Fixed-capacity LIFO stack.
///
/// `push` inserts at the head of the underlying list and `pop` takes the
/// head back out, so the top of the stack is always the first list element.
#[derive(Debug)]
pub struct Stack<T> {
    list: PooledList<T>,
}

impl<T> Stack<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            list: PooledList::with_capacity(capacity)?,
        })
    }

    /// Push onto the top. Fails with `OutOfMemory` when the pool is full.
    pub fn push(&mut self, payload: T) -> Result<Handle, CollectionError> {
        self.list.insert(0, payload)
    }

    /// Take the top element. Fails with `Empty` on an empty stack.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.first().and_then(|h| self.list.get(h))
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

    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// Iterate from the top of the stack down.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}
