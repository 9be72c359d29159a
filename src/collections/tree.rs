//! Fixed-capacity n-ary tree with a depth-first iterator.
//!
//! Nodes use the first-child / next-sibling representation and live in a
//! pool sized once at construction. Slot 0 is a sentinel root that carries no
//! payload; inserting under `None` attaches to it, so top-level and nested
//! inserts go through the same search.

use crate::collections::error::CollectionError;
use crate::collections::stack::Stack;

const ROOT: usize = 0;

#[derive(Debug)]
struct TreeNode<T> {
    payload: Option<T>,
    age: usize,
    first_child: Option<usize>,
    next_sibling: Option<usize>,
}

/// Pooled n-ary tree addressed by payload equality.
///
/// # Example
///
/// ```rust
/// use hfsm::collections::Tree;
///
/// let mut tree = Tree::with_capacity(4).unwrap();
/// tree.insert(None, "a").unwrap();
/// tree.insert(Some(&"a"), "b").unwrap();
/// tree.insert(None, "c").unwrap();
///
/// let visited: Vec<_> = tree.iter().unwrap().collect();
/// assert_eq!(visited, vec![(1, &"a"), (2, &"b"), (1, &"c")]);
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    nodes: Vec<TreeNode<T>>,
    capacity: usize,
}

impl<T: PartialEq> Tree<T> {
    /// Reserve `capacity + 1` slots, one of them taken by the sentinel root.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        if capacity == 0 {
            return Err(CollectionError::InvalidArgument("capacity must be non-zero"));
        }

        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(TreeNode {
            payload: None,
            age: 0,
            first_child: None,
            next_sibling: None,
        });

        Ok(Self { nodes, capacity })
    }

    /// Attach `payload` as the last child of the first node equal to
    /// `parent` (the sentinel root when `parent` is `None`).
    ///
    /// Returns the depth of the new node, 1 for a top-level node.
    pub fn insert(&mut self, parent: Option<&T>, payload: T) -> Result<usize, CollectionError> {
        let parent = self.search(Some(ROOT), parent).ok_or(CollectionError::NotFound)?;
        if self.nodes.len() > self.capacity {
            return Err(CollectionError::OutOfMemory {
                capacity: self.capacity,
            });
        }

        let age = self.nodes[parent].age + 1;
        let node = self.nodes.len();
        self.nodes.push(TreeNode {
            payload: Some(payload),
            age,
            first_child: None,
            next_sibling: None,
        });

        match self.nodes[parent].first_child {
            None => self.nodes[parent].first_child = Some(node),
            Some(mut sibling) => {
                while let Some(next) = self.nodes[sibling].next_sibling {
                    sibling = next;
                }
                self.nodes[sibling].next_sibling = Some(node);
            }
        }

        Ok(age)
    }

    /// Whole sibling level first, then each sibling's subtree in order.
    fn search(&self, first: Option<usize>, target: Option<&T>) -> Option<usize> {
        let mut cursor = first;
        while let Some(index) = cursor {
            if self.nodes[index].payload.as_ref() == target {
                return Some(index);
            }
            cursor = self.nodes[index].next_sibling;
        }

        let mut cursor = first;
        while let Some(index) = cursor {
            if let Some(found) = self.search(self.nodes[index].first_child, target) {
                return Some(found);
            }
            cursor = self.nodes[index].next_sibling;
        }

        None
    }

    pub fn contains(&self, payload: &T) -> bool {
        self.search(self.nodes[ROOT].first_child, Some(payload)).is_some()
    }

    /// Pre-order iterator yielding `(age, payload)` pairs.
    ///
    /// The iterator owns its own fringe stack, released when it is dropped.
    pub fn iter(&self) -> Result<TreeIter<'_, T>, CollectionError> {
        let mut fringe = Stack::with_capacity(self.capacity)?;
        if let Some(first) = self.nodes[ROOT].first_child {
            fringe.push(first)?;
        }
        Ok(TreeIter {
            tree: self,
            fringe,
            age: 0,
        })
    }

    /// Drop every node except the sentinel root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[ROOT].first_child = None;
    }

    /// Number of payload-carrying nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Depth-first iterator over a [`Tree`].
pub struct TreeIter<'a, T> {
    tree: &'a Tree<T>,
    fringe: Stack<usize>,
    age: usize,
}

impl<T> TreeIter<'_, T> {
    /// Depth of the node most recently yielded, 0 before the first step.
    pub fn age(&self) -> usize {
        self.age
    }
}

impl<'a, T> Iterator for TreeIter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.fringe.pop().ok()?;
        let node = &self.tree.nodes[index];

        // Sibling goes under the child so the child's subtree comes out first.
        for pending in [node.next_sibling, node.first_child].into_iter().flatten() {
            let pushed = self.fringe.push(pending);
            debug_assert!(pushed.is_ok(), "tree iterator fringe overflow");
        }

        self.age = node.age;
        node.payload.as_ref().map(|payload| (node.age, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<&'static str> {
        // a
        // ├─ b
        // │  └─ d
        // └─ c
        // e
        let mut tree = Tree::with_capacity(8).unwrap();
        tree.insert(None, "a").unwrap();
        tree.insert(Some(&"a"), "b").unwrap();
        tree.insert(Some(&"a"), "c").unwrap();
        tree.insert(Some(&"b"), "d").unwrap();
        tree.insert(None, "e").unwrap();
        tree
    }

    #[test]
    fn zero_capacity_tree_is_rejected() {
        assert!(matches!(
            Tree::<u8>::with_capacity(0),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn iteration_is_pre_order() {
        let tree = sample();
        let names: Vec<_> = tree.iter().unwrap().map(|(_, name)| *name).collect();
        assert_eq!(names, vec!["a", "b", "d", "c", "e"]);
    }

    #[test]
    fn age_counts_ancestors() {
        let tree = sample();
        let ages: Vec<_> = tree.iter().unwrap().map(|(age, _)| age).collect();
        assert_eq!(ages, vec![1, 2, 3, 2, 1]);
    }

    #[test]
    fn iterator_reports_current_age() {
        let tree = sample();
        let mut iter = tree.iter().unwrap();
        assert_eq!(iter.age(), 0);
        iter.next();
        iter.next();
        assert_eq!(iter.age(), 2);
    }

    #[test]
    fn unknown_parent_is_not_found() {
        let mut tree = sample();
        assert_eq!(tree.insert(Some(&"z"), "y"), Err(CollectionError::NotFound));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn full_tree_rejects_insert() {
        let mut tree = Tree::with_capacity(1).unwrap();
        tree.insert(None, 1).unwrap();
        assert_eq!(
            tree.insert(Some(&1), 2),
            Err(CollectionError::OutOfMemory { capacity: 1 })
        );
    }

    #[test]
    fn duplicate_parent_attaches_under_first_match() {
        let mut tree = Tree::with_capacity(6).unwrap();
        tree.insert(None, 'x').unwrap();
        tree.insert(None, 'y').unwrap();
        tree.insert(Some(&'y'), 'x').unwrap();

        // The top-level 'x' is found before the nested one.
        assert_eq!(tree.insert(Some(&'x'), 'z'), Ok(2));

        let visited: Vec<_> = tree.iter().unwrap().collect();
        assert_eq!(visited, vec![(1, &'x'), (2, &'z'), (1, &'y'), (2, &'x')]);
    }

    #[test]
    fn empty_tree_iterates_nothing() {
        let tree = Tree::<u32>::with_capacity(2).unwrap();
        assert_eq!(tree.iter().unwrap().count(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn clear_resets_to_root_only() {
        let mut tree = sample();
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.contains(&"a"));
        tree.insert(None, "a").unwrap();
        assert!(tree.contains(&"a"));
    }
}
