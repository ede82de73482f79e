/*!
# Complete Trees

A [`CompleteTree`] stores an `N`-ary complete tree in a flat `Vec` without any node objects.
The identity of a node is its position: the root lives at index `0`, the children of index `i`
occupy `N*i+1 ..= N*i+N` and the parent of index `i >= 1` is `(i-1)/N`.

The raw index arithmetic is exposed as the free functions [`parent_idx`] and [`children_idx`]
that operate on signed indices so that they can be probed outside the valid range without
panicking (the parent of the root is `-1`).
*/

use std::{
    fmt::{self, Display},
    ops::{Index, Range},
};

use crate::{
    error::{Result, raise_error_unless},
    tree::display::{Span, render_levels},
};

/// Returns the parent index `(idx - 1) / n` of `idx` using floor division.
///
/// Negative indices are accepted: `parent_idx(0, n) == -1` for all `n`.
/// ** Panics if `n == 0` **
///
/// # Example
/// ```
/// use arbores::tree::parent_idx;
///
/// assert_eq!(parent_idx(5, 2), 2);
/// assert_eq!(parent_idx(0, 3), -1);
/// ```
pub const fn parent_idx(idx: isize, n: isize) -> isize {
    (idx - 1).div_euclid(n)
}

/// Returns the `n` child indices `n*idx+1 ..= n*idx+n` of `idx`.
///
/// # Example
/// ```
/// use arbores::tree::children_idx;
///
/// assert_eq!(children_idx(1, 3).collect::<Vec<_>>(), vec![4, 5, 6]);
/// ```
pub const fn children_idx(idx: isize, n: isize) -> Range<isize> {
    let first = n * idx + 1;
    first..first + n
}

/// Array-backed storage for an `N`-ary complete tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTree<T> {
    array: Vec<T>,
    child_slots: usize,
}

impl<T> CompleteTree<T> {
    /// Creates an empty tree with branching factor `child_slots`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if `child_slots < 2`.
    pub fn new(child_slots: usize) -> Result<Self> {
        Self::from_vec(Vec::new(), child_slots)
    }

    /// Creates a tree whose level-order is given by `array`
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if `child_slots < 2`.
    pub fn from_vec(array: Vec<T>, child_slots: usize) -> Result<Self> {
        raise_error_unless!(
            child_slots >= 2,
            InvalidConfiguration,
            "a complete tree needs at least 2 child slots, got {child_slots}"
        );

        Ok(Self { array, child_slots })
    }

    /// Creates an empty binary tree
    pub fn binary() -> Self {
        Self {
            array: Vec::new(),
            child_slots: 2,
        }
    }

    /// Returns the branching factor
    pub fn child_slots(&self) -> usize {
        self.child_slots
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Returns *true* if no element is stored
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Appends `value` as the new last node
    pub fn push(&mut self, value: T) {
        self.array.push(value);
    }

    /// Removes and returns the last node
    pub fn pop(&mut self) -> Option<T> {
        self.array.pop()
    }

    /// Returns the value at position `idx`
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.array.get(idx)
    }

    /// Returns a mutable reference to the value at position `idx`
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.array.get_mut(idx)
    }

    /// Returns the root value
    pub fn root(&self) -> Option<&T> {
        self.array.first()
    }

    /// Returns the last value
    pub fn last(&self) -> Option<&T> {
        self.array.last()
    }

    /// Swaps the values at positions `a` and `b`.
    /// ** Panics if `a >= len || b >= len` **
    pub fn swap(&mut self, a: usize, b: usize) {
        self.array.swap(a, b);
    }

    /// Returns the level-order slice of all values
    pub fn as_slice(&self) -> &[T] {
        &self.array
    }

    /// Consumes the tree and returns its level-order values
    pub fn into_vec(self) -> Vec<T> {
        self.array
    }

    /// Iterates over all values in level-order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.array.iter()
    }

    /// Returns the parent position of `idx` or `None` for the root
    pub fn parent_of(&self, idx: usize) -> Option<usize> {
        (idx > 0).then(|| (idx - 1) / self.child_slots)
    }

    /// Returns the positions of all *existing* children of `idx` (possibly empty)
    pub fn children_of(&self, idx: usize) -> Range<usize> {
        let len = self.array.len();
        let first = idx.saturating_mul(self.child_slots).saturating_add(1);
        first.min(len)..first.saturating_add(self.child_slots).min(len)
    }

    /// Returns *true* if `idx` has no existing child
    pub fn is_leaf(&self, idx: usize) -> bool {
        self.children_of(idx).is_empty()
    }

    /// Returns the generation of `idx`, i.e. the number of edges to the root
    pub fn depth_of(&self, mut idx: usize) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.parent_of(idx) {
            idx = parent;
            depth += 1;
        }
        depth
    }

    /// Iterates over the generations of the tree, each as a (possibly partial) slice
    ///
    /// # Example
    /// ```
    /// use arbores::tree::CompleteTree;
    ///
    /// let tree = CompleteTree::from_vec((0..6).collect(), 2).unwrap();
    /// let levels: Vec<&[i32]> = tree.levels().collect();
    /// assert_eq!(levels, vec![&[0][..], &[1, 2][..], &[3, 4, 5][..]]);
    /// ```
    pub fn levels(&self) -> impl Iterator<Item = &[T]> + '_ {
        let n = self.child_slots;
        let mut start = 0usize;
        let mut size = 1usize;

        std::iter::from_fn(move || {
            if start >= self.array.len() {
                return None;
            }

            let end = start.saturating_add(size).min(self.array.len());
            let level = &self.array[start..end];
            start = end;
            size = size.saturating_mul(n);
            Some(level)
        })
    }
}

impl<T: Display> CompleteTree<T> {
    /// Renders the tree one generation per line, centered within `width` columns
    pub fn display(&self, width: usize) -> String {
        let n = self.child_slots;
        let mut span_width = 1.0;

        let levels: Vec<Vec<(Span, String)>> = self
            .levels()
            .map(|level| {
                let labels = level
                    .iter()
                    .enumerate()
                    .map(|(pos, value)| {
                        let span = Span {
                            start: pos as f64 * span_width,
                            width: span_width,
                        };
                        (span, value.to_string())
                    })
                    .collect();
                span_width /= n as f64;
                labels
            })
            .collect();

        render_levels(&levels, width)
    }
}

impl<T> Index<usize> for CompleteTree<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.array[idx]
    }
}

impl<T: Display> Display for CompleteTree<T> {
    /// Uses the formatter width (default: `80`) as rendering width
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(f.width().unwrap_or(80)))
    }
}

impl<'a, T> IntoIterator for &'a CompleteTree<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
