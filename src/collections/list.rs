//! Fixed-capacity doubly linked list over a pooled arena.
//!
//! Every slot is allocated up front. Unused slots are chained on an internal
//! free-list, so `insert` and `remove` never touch the allocator after
//! construction. Elements are addressed through generation-checked
//! [`Handle`]s: a handle to a removed element is rejected instead of aliasing
//! whatever reuses its slot.

use crate::collections::error::CollectionError;
use std::fmt;

/// Handle to an element stored in a [`PooledList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

struct Slot<T> {
    prev: Option<usize>,
    next: Option<usize>,
    generation: u32,
    payload: Option<T>,
}

/// Doubly linked list with a fixed number of pooled slots.
///
/// # Example
///
/// ```rust
/// use hfsm::collections::{CollectionError, PooledList};
///
/// let mut list = PooledList::with_capacity(2).unwrap();
/// list.push_back(1).unwrap();
/// list.push_front(0).unwrap();
///
/// assert_eq!(list.push_back(2), Err(CollectionError::OutOfMemory { capacity: 2 }));
/// assert_eq!(list.to_vec(), vec![0, 1]);
/// ```
pub struct PooledList<T> {
    slots: Vec<Slot<T>>,
    released: Option<usize>,
    root: Option<usize>,
    last: Option<usize>,
    count: usize,
}

impl<T> PooledList<T> {
    /// Pre-allocate `capacity` slots and chain them onto the free-list.
    ///
    /// Fails with `InvalidArgument` when `capacity` is zero or `T` is a
    /// zero-sized type.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        if capacity == 0 {
            return Err(CollectionError::InvalidArgument("capacity must be non-zero"));
        }
        if std::mem::size_of::<T>() == 0 {
            return Err(CollectionError::InvalidArgument("payload must not be zero-sized"));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot {
            prev: None,
            next: None,
            generation: 0,
            payload: None,
        });

        let mut list = Self {
            slots,
            released: None,
            root: None,
            last: None,
            count: 0,
        };
        list.setup();
        Ok(list)
    }

    /// Chain every slot onto the free-list, lowest index on top.
    fn setup(&mut self) {
        self.released = None;
        self.root = None;
        self.last = None;
        self.count = 0;
        for index in (0..self.slots.len()).rev() {
            self.push_released(index);
        }
    }

    fn push_released(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.prev = None;
        slot.next = self.released;
        self.released = Some(index);
    }

    fn pop_released(&mut self) -> Result<usize, CollectionError> {
        let index = self.released.ok_or(CollectionError::OutOfMemory {
            capacity: self.slots.len(),
        })?;
        self.released = self.slots[index].next;
        self.slots[index].next = None;
        Ok(index)
    }

    fn handle(&self, index: usize) -> Handle {
        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn resolve(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.index)?;
        (slot.payload.is_some() && slot.generation == handle.generation).then_some(handle.index)
    }

    /// Slot currently at position `index`, or `None` when `index == len`.
    fn locate(&self, index: usize) -> Result<Option<usize>, CollectionError> {
        if index > self.count {
            return Err(CollectionError::InvalidArgument("index out of range"));
        }
        let mut cursor = self.root;
        for _ in 0..index {
            cursor = cursor.and_then(|i| self.slots[i].next);
        }
        Ok(cursor)
    }

    /// Store `payload` at position `index`.
    ///
    /// `0` inserts at the head, a negative index appends at the tail and a
    /// positive index inserts before the element currently at that position
    /// (`index == len()` appends). An index past the end is rejected without
    /// consuming a slot.
    pub fn insert(&mut self, index: isize, payload: T) -> Result<Handle, CollectionError> {
        let anchor = if index > 0 {
            self.locate(index.unsigned_abs())?
        } else {
            None
        };

        let node = self.pop_released()?;
        self.slots[node].payload = Some(payload);

        match (index, anchor) {
            (0, _) => self.link_front(node),
            (i, Some(before)) if i > 0 => self.link_before(node, before),
            _ => self.link_back(node),
        }
        self.count += 1;

        Ok(self.handle(node))
    }

    /// Insert at the head.
    pub fn push_front(&mut self, payload: T) -> Result<Handle, CollectionError> {
        self.insert(0, payload)
    }

    /// Append at the tail.
    pub fn push_back(&mut self, payload: T) -> Result<Handle, CollectionError> {
        self.insert(-1, payload)
    }

    fn link_front(&mut self, node: usize) {
        self.slots[node].prev = None;
        self.slots[node].next = self.root;
        match self.root {
            Some(root) => self.slots[root].prev = Some(node),
            None => self.last = Some(node),
        }
        self.root = Some(node);
    }

    fn link_back(&mut self, node: usize) {
        self.slots[node].next = None;
        self.slots[node].prev = self.last;
        match self.last {
            Some(last) => self.slots[last].next = Some(node),
            None => self.root = Some(node),
        }
        self.last = Some(node);
    }

    fn link_before(&mut self, node: usize, before: usize) {
        let prev = self.slots[before].prev;
        self.slots[node].prev = prev;
        self.slots[node].next = Some(before);
        self.slots[before].prev = Some(node);
        match prev {
            Some(prev) => self.slots[prev].next = Some(node),
            None => self.root = Some(node),
        }
    }

    /// Unlink the element behind `handle` and return its payload.
    ///
    /// The slot goes back on the free-list and every outstanding copy of the
    /// handle becomes stale.
    pub fn remove(&mut self, handle: Handle) -> Result<T, CollectionError> {
        let index = self
            .resolve(handle)
            .ok_or(CollectionError::InvalidArgument("stale or foreign handle"))?;

        let (prev, next) = (self.slots[index].prev, self.slots[index].next);
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.root = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.last = prev,
        }
        self.count -= 1;

        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let payload = slot.payload.take();
        self.push_released(index);

        payload.ok_or(CollectionError::InvalidArgument("stale or foreign handle"))
    }

    /// Remove the head element.
    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        let head = self.first().ok_or(CollectionError::Empty)?;
        self.remove(head)
    }

    /// Return every slot to the free-list without releasing the pool.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.payload.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.setup();
    }

    /// Handle of the head element.
    pub fn first(&self) -> Option<Handle> {
        self.root.map(|i| self.handle(i))
    }

    /// Handle of the tail element.
    pub fn last(&self) -> Option<Handle> {
        self.last.map(|i| self.handle(i))
    }

    /// Handle of the element following `handle`.
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle)?;
        self.slots[index].next.map(|i| self.handle(i))
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let index = self.resolve(handle)?;
        self.slots[index].payload.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let index = self.resolve(handle)?;
        self.slots[index].payload.as_mut()
    }

    /// First element matching `predicate`, scanning head to tail.
    pub fn find<F>(&self, mut predicate: F) -> Option<Handle>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.root;
        while let Some(index) = cursor {
            if self.slots[index].payload.as_ref().is_some_and(&mut predicate) {
                return Some(self.handle(index));
            }
            cursor = self.slots[index].next;
        }
        None
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.root,
            remaining: self.count,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots left on the free-list.
    pub fn available(&self) -> usize {
        self.slots.len() - self.count
    }
}

impl<T: Clone> PooledList<T> {
    /// Copy the elements out, head to tail.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for PooledList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing head-to-tail iterator over a [`PooledList`].
pub struct Iter<'a, T> {
    list: &'a PooledList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.list.slots[index];
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        slot.payload.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a PooledList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
