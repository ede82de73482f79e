/*!
# N-ary Heaps

A [`Heap`] is a priority queue on top of a [`CompleteTree`]. Its [`Polarity`] decides whether
the most extreme value at the root is the maximum or the minimum.

The heap property is checked pairwise via [`Heap::is_heapish`]: comparing a parent with its child
must never contradict the polarity. Ties are always fine.

# Example
```
use arbores::tree::Heap;

let mut heap = Heap::default();
heap.extend([5, 3, 8, 1]);

assert_eq!(heap.pop(), Some(8));
assert_eq!(heap.pop(), Some(5));
assert_eq!(heap.len(), 2);
```
*/

use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

use crate::{
    error::{Error, Result},
    testing::test_heap_ops,
    tree::CompleteTree,
};

/// Direction of a [`Heap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Polarity {
    /// Largest value at the root
    #[default]
    Max,
    /// Smallest value at the root
    Min,
}

impl Polarity {
    /// The comparison value `parent.cmp(child)` a heap of this polarity prefers: `1` or `-1`
    pub const fn cmp_val(&self) -> i8 {
        match self {
            Polarity::Max => 1,
            Polarity::Min => -1,
        }
    }

    /// The only ordering of `parent.cmp(child)` that violates the heap property
    const fn violation(&self) -> Ordering {
        match self {
            Polarity::Max => Ordering::Less,
            Polarity::Min => Ordering::Greater,
        }
    }
}

impl TryFrom<i8> for Polarity {
    type Error = Error;

    fn try_from(cmp_val: i8) -> Result<Self> {
        match cmp_val {
            1 => Ok(Polarity::Max),
            -1 => Ok(Polarity::Min),
            _ => Err(Error::InvalidConfiguration(format!(
                "unknown heap polarity {cmp_val}, expected 1 (max) or -1 (min)"
            ))),
        }
    }
}

/// Priority queue layered on an `N`-ary [`CompleteTree`]
#[derive(Debug, Clone)]
pub struct Heap<T> {
    tree: CompleteTree<T>,
    polarity: Polarity,
}

impl<T: Ord> Default for Heap<T> {
    /// A binary max-heap
    fn default() -> Self {
        Self::max()
    }
}

impl<T: Ord> Heap<T> {
    /// Creates an empty heap.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] if `child_slots < 2`.
    pub fn new(polarity: Polarity, child_slots: usize) -> Result<Self> {
        Ok(Self {
            tree: CompleteTree::new(child_slots)?,
            polarity,
        })
    }

    /// Creates an empty binary max-heap
    pub fn max() -> Self {
        Self {
            tree: CompleteTree::binary(),
            polarity: Polarity::Max,
        }
    }

    /// Creates an empty binary min-heap
    pub fn min() -> Self {
        Self {
            tree: CompleteTree::binary(),
            polarity: Polarity::Min,
        }
    }

    /// Builds a heap from arbitrary values in `O(n)` by sifting down every inner node bottom-up.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] if `child_slots < 2`.
    pub fn from_vec(values: Vec<T>, polarity: Polarity, child_slots: usize) -> Result<Self> {
        let mut heap = Self {
            tree: CompleteTree::from_vec(values, child_slots)?,
            polarity,
        };

        if let Some(last_inner) = heap.tree.parent_of(heap.len().saturating_sub(1)) {
            for idx in (0..=last_inner).rev() {
                heap.sift_down(idx);
            }
        }

        Ok(heap)
    }

    /// Returns the polarity of the heap
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns the branching factor of the underlying tree
    pub fn child_slots(&self) -> usize {
        self.tree.child_slots()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns *true* if no value is stored
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the most extreme value without removing it
    pub fn peek(&self) -> Option<&T> {
        self.tree.root()
    }

    /// Inserts `value` and restores the heap property in `O(log_N len)`
    pub fn push(&mut self, value: T) {
        self.tree.push(value);
        self.sift_up(self.tree.len() - 1);
    }

    /// Removes and returns the most extreme value in `O(N log_N len)`
    pub fn pop(&mut self) -> Option<T> {
        let mut top = self.tree.pop()?;
        if let Some(root) = self.tree.get_mut(0) {
            std::mem::swap(root, &mut top);
            self.sift_down(0);
        }
        Some(top)
    }

    /// Returns *true* if the values at `parent` and `child` do not contradict the polarity.
    /// Positions without a value never violate the heap property.
    pub fn is_heapish(&self, parent: usize, child: usize) -> bool {
        match (self.tree.get(parent), self.tree.get(child)) {
            (Some(p), Some(c)) => p.cmp(c) != self.polarity.violation(),
            _ => true,
        }
    }

    /// Validates the heap property on the complete structure.
    /// Meant for tests, as it visits every value.
    pub fn is_heap(&self) -> bool {
        self.is_heap_at(0)
    }

    /// Validates the heap property on the subtree rooted at `idx`
    pub fn is_heap_at(&self, idx: usize) -> bool {
        let mut stack = vec![idx];
        while let Some(u) = stack.pop() {
            for c in self.tree.children_of(u) {
                if !self.is_heapish(u, c) {
                    return false;
                }
                stack.push(c);
            }
        }
        true
    }

    /// Borrows the underlying complete tree
    pub fn as_tree(&self) -> &CompleteTree<T> {
        &self.tree
    }

    /// Consumes the heap and returns the underlying complete tree
    pub fn into_tree(self) -> CompleteTree<T> {
        self.tree
    }

    /// Consumes the heap and returns all values in pop-order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            values.push(value);
        }
        values
    }

    /// Moves the value at `idx` towards the root until its parent is heapish to it
    fn sift_up(&mut self, mut idx: usize) {
        while let Some(parent) = self.tree.parent_of(idx) {
            if self.is_heapish(parent, idx) {
                break;
            }
            self.tree.swap(parent, idx);
            idx = parent;
        }
    }

    /// Moves the value at `idx` towards the leaves, always swapping with the heapiest child
    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let heapiest = self
                .tree
                .children_of(idx)
                .reduce(|best, c| if self.is_heapish(best, c) { best } else { c });

            match heapiest {
                Some(c) if !self.is_heapish(idx, c) => {
                    self.tree.swap(idx, c);
                    idx = c;
                }
                _ => break,
            }
        }
    }
}

impl<T: Ord> Extend<T> for Heap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for Heap<T> {
    /// Collects into a binary max-heap
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::max();
        heap.extend(iter);
        heap
    }
}

impl<T: Display> Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.tree, f)
    }
}

test_heap_ops!(max_binary_heap, Polarity::Max, 2);
test_heap_ops!(min_binary_heap, Polarity::Min, 2);
test_heap_ops!(max_ternary_heap, Polarity::Max, 3);
test_heap_ops!(min_quaternary_heap, Polarity::Min, 4);
test_heap_ops!(max_wide_heap, Polarity::Max, 7);

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn push_then_pop_largest() {
        let mut heap = Heap::default();
        for x in [5, 3, 8, 1] {
            heap.push(x);
        }

        assert_eq!(heap.peek(), Some(&8));
        assert_eq!(heap.pop(), Some(8));
        assert_eq!(heap.pop(), Some(5));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn pop_order() {
        let max: Heap<_> = (1..=10).collect();
        assert_eq!(max.into_sorted_vec(), (1..=10).rev().collect_vec());

        let mut min = Heap::min();
        min.extend((1..=10).rev());
        assert_eq!(min.into_sorted_vec(), (1..=10).collect_vec());
    }

    #[test]
    fn empty_heap() {
        let mut heap: Heap<u8> = Heap::new(Polarity::Min, 3).unwrap();
        assert_eq!(heap.pop(), None);
        assert_eq!(heap.peek(), None);
        assert!(heap.is_heap());

        heap.push(4);
        assert_eq!(heap.pop(), Some(4));
        assert!(heap.is_empty());
    }

    #[test]
    fn ties_are_heapish() {
        let mut heap = Heap::max();
        heap.extend([2, 2, 2, 1, 2]);
        assert!(heap.is_heapish(0, 1));
        assert!(heap.is_heapish(0, 2));
        assert!(heap.is_heap());
        assert_eq!(heap.into_sorted_vec(), vec![2, 2, 2, 2, 1]);
    }

    #[test]
    fn missing_positions_are_heapish() {
        let heap: Heap<_> = [3, 1].into_iter().collect();
        assert!(heap.is_heapish(0, 2));
        assert!(heap.is_heapish(7, 0));
    }

    #[test]
    fn detects_broken_heap() {
        // the complete tree allows arbitrary contents, so we break the heap by hand
        let mut heap = Heap::from_vec(vec![1, 2, 3, 4, 5], Polarity::Min, 2).unwrap();
        assert!(heap.is_heap());
        heap.tree.swap(0, 4);
        assert!(!heap.is_heapish(1, 4));
        assert!(!heap.is_heap());
        assert!(heap.is_heap_at(2));
    }

    #[test]
    fn polarity_from_cmp_val() {
        assert_eq!(Polarity::try_from(1i8), Ok(Polarity::Max));
        assert_eq!(Polarity::try_from(-1i8), Ok(Polarity::Min));
        assert!(Polarity::try_from(0i8).unwrap_err().is_invalid_configuration());
        assert!(Polarity::try_from(2i8).is_err());
        assert_eq!(Polarity::Max.cmp_val(), 1);
        assert_eq!(Polarity::Min.cmp_val(), -1);
    }

    #[test]
    fn invalid_branching() {
        assert!(Heap::<u8>::new(Polarity::Max, 1).is_err());
        assert!(Heap::<u8>::from_vec(vec![1], Polarity::Max, 0).is_err());
    }

    #[test]
    fn heapify_in_place() {
        let heap = Heap::from_vec(vec![9, 4, 7, 1, 8, 2, 6], Polarity::Min, 3).unwrap();
        assert!(heap.is_heap());
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn renders_as_tree() {
        let heap: Heap<_> = [1, 2, 3].into_iter().collect();
        assert_eq!(format!("{heap:8}"), "    3\n  1   2");
    }
}
