/*!
# Key Trees

A [`KeyTree`] is a [`Tree`] whose nodes carry a key next to their value. The key decides the slot
a new node is routed into:

- **Binary** trees are binary search trees. Smaller keys go left, larger keys go right. An equal
  key is a [`Error::StructuralConflict`] unless the tree allows duplicates, in which case it is
  routed right.
- **Ternary** trees compare `key <=> node.key` and use the result `-1, 0, 1` as slot `0, 1, 2`.
  Equal keys are never rejected but chained along the middle slot.

# Example
```
use arbores::tree::KeyTree;

let mut bst = KeyTree::binary(8, "eight", false);
bst.insert(3, "three").unwrap();
bst.insert(10, "ten").unwrap();
assert!(bst.insert(3, "again").is_err());

let node = bst.search(&10).unwrap().unwrap();
assert_eq!(bst[node].value(), &"ten");
assert_eq!(bst.search(&4).unwrap(), None);
```
*/

use std::{cmp::Ordering, fmt::Display, ops::Index};

use crate::{
    error::{Error, Result, raise_error_unless},
    tree::{NodeId, ROOT, Tree},
};

/// Number of child slots of a [`KeyTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branching {
    /// Binary search tree
    Binary,
    /// Ternary tree chaining equal keys along the middle slot
    Ternary,
}

impl Branching {
    /// Returns the number of child slots
    pub const fn child_slots(&self) -> usize {
        match self {
            Branching::Binary => 2,
            Branching::Ternary => 3,
        }
    }
}

impl TryFrom<usize> for Branching {
    type Error = Error;

    fn try_from(child_slots: usize) -> Result<Self> {
        match child_slots {
            2 => Ok(Branching::Binary),
            3 => Ok(Branching::Ternary),
            _ => Err(Error::InvalidConfiguration(format!(
                "key trees support 2 or 3 child slots, got {child_slots}"
            ))),
        }
    }
}

/// Key/value pair stored in a [`KeyTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNode<K, V> {
    key: K,
    value: V,
}

impl<K, V> KeyNode<K, V> {
    /// Returns the key
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Search tree with binary or ternary branching
#[derive(Debug, Clone)]
pub struct KeyTree<K, V> {
    tree: Tree<KeyNode<K, V>>,
    branching: Branching,
    duplicates: bool,
}

impl<K: Ord, V> KeyTree<K, V> {
    /// Creates a tree with root `(key, value)` and `child_slots` ∈ {2, 3}.
    /// `duplicates` only affects binary trees.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] for any other number of child slots.
    pub fn new(key: K, value: V, child_slots: usize, duplicates: bool) -> Result<Self> {
        let branching = Branching::try_from(child_slots)?;
        Ok(Self::with_branching(key, value, branching, duplicates))
    }

    /// Creates a binary search tree
    pub fn binary(key: K, value: V, duplicates: bool) -> Self {
        Self::with_branching(key, value, Branching::Binary, duplicates)
    }

    /// Creates a ternary tree
    pub fn ternary(key: K, value: V) -> Self {
        Self::with_branching(key, value, Branching::Ternary, true)
    }

    fn with_branching(key: K, value: V, branching: Branching, duplicates: bool) -> Self {
        Self {
            tree: Tree::from_root(KeyNode { key, value }, branching.child_slots()),
            branching,
            duplicates,
        }
    }

    /// Returns the branching of the tree
    pub fn branching(&self) -> Branching {
        self.branching
    }

    /// Returns *true* if equal keys are accepted
    pub fn duplicates(&self) -> bool {
        self.duplicates || self.branching == Branching::Ternary
    }

    /// Number of nodes (at least 1)
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// A key tree always contains its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the node with id `u`
    pub fn get(&self, u: NodeId) -> Option<&KeyNode<K, V>> {
        self.tree.value(u)
    }

    /// Borrows the underlying node tree, e.g. for generation or sibling queries
    pub fn as_tree(&self) -> &Tree<KeyNode<K, V>> {
        &self.tree
    }

    /// Slot `key` is routed into when compared with node `u`
    fn cidx(&self, key: &K, u: NodeId) -> usize {
        let ord = key.cmp(&self.tree[u].value().key);
        match (self.branching, ord) {
            (Branching::Binary, Ordering::Less) => 0,
            (Branching::Binary, _) => 1,
            (Branching::Ternary, ord) => (ord as i8 + 1) as usize,
        }
    }

    /// Inserts `(key, value)` into the first empty slot along the comparison path.
    ///
    /// # Errors
    /// Returns [`Error::StructuralConflict`] if the tree is binary without duplicates and
    /// `key` is already present. The tree is unchanged in this case.
    pub fn insert(&mut self, key: K, value: V) -> Result<NodeId> {
        let mut u = ROOT;
        loop {
            raise_error_unless!(
                self.duplicates() || key != self.tree[u].value().key,
                StructuralConflict,
                "key of node {u} is already present and duplicates are disabled"
            );

            let slot = self.cidx(&key, u);
            match self.tree[u].child(slot) {
                Some(child) => u = child,
                None => return self.tree.set_child(u, slot, KeyNode { key, value }),
            }
        }
    }

    /// Returns the node of the first match of `key` in a binary tree, or `None`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] if the tree is ternary; use [`KeyTree::search_all`].
    pub fn search(&self, key: &K) -> Result<Option<NodeId>> {
        raise_error_unless!(
            self.branching == Branching::Binary,
            InvalidConfiguration,
            "single-node search requires a binary tree, use search_all on ternary trees"
        );

        Ok(self.find_first(key))
    }

    /// Returns every node sharing `key` along the duplicate chain of a ternary tree, ordered from
    /// the root downwards (possibly empty).
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] if the tree is binary; use [`KeyTree::search`].
    pub fn search_all(&self, key: &K) -> Result<Vec<NodeId>> {
        raise_error_unless!(
            self.branching == Branching::Ternary,
            InvalidConfiguration,
            "chain search requires a ternary tree, use search on binary trees"
        );

        let chain = std::iter::successors(self.find_first(key), |&u| {
            self.tree[u]
                .child(1)
                .filter(|&c| self.tree[c].value().key == *key)
        });

        Ok(chain.collect())
    }

    /// Returns *true* if some node carries `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_first(key).is_some()
    }

    fn find_first(&self, key: &K) -> Option<NodeId> {
        let mut u = ROOT;
        loop {
            if self.tree[u].value().key == *key {
                return Some(u);
            }
            u = self.tree[u].child(self.cidx(key, u))?;
        }
    }

    /// Iterates over all nodes in key order (in-order traversal)
    pub fn iter(&self) -> impl Iterator<Item = &KeyNode<K, V>> + '_ {
        // `true` marks a node whose left subtree was already scheduled
        let mut stack = vec![(ROOT, false)];
        std::iter::from_fn(move || {
            while let Some((u, expanded)) = stack.pop() {
                let node = &self.tree[u];
                if expanded {
                    return Some(node.value());
                }

                stack.extend(node.slots()[1..].iter().rev().flatten().map(|&c| (c, false)));
                stack.push((u, true));
                if let Some(left) = node.child(0) {
                    stack.push((left, false));
                }
            }
            None
        })
    }

    /// Iterates over all keys in order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(KeyNode::key)
    }
}

impl<K: Ord + Display, V> KeyTree<K, V> {
    /// Renders the keys one generation per line within `width` columns
    pub fn display(&self, width: usize) -> String {
        self.tree.display_with(width, |node| node.key.to_string())
    }
}

impl<K, V> Index<NodeId> for KeyTree<K, V> {
    type Output = KeyNode<K, V>;

    fn index(&self, u: NodeId) -> &KeyNode<K, V> {
        self.tree[u].value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{SeedableRng, seq::SliceRandom};
    use rand_pcg::Pcg64Mcg;

    fn random_bst(seed: u64) -> KeyTree<u32, String> {
        let rng = &mut Pcg64Mcg::seed_from_u64(seed);
        let mut keys = (1..=30).collect_vec();
        keys.shuffle(rng);

        let mut tree = KeyTree::binary(keys[0], keys[0].to_string(), false);
        for &k in &keys[1..] {
            tree.insert(k, k.to_string()).unwrap();
        }
        tree
    }

    #[test]
    fn bst_search() {
        for seed in 0..10 {
            let tree = random_bst(seed);
            assert_eq!(tree.len(), 30);

            for k in 1..=30 {
                let u = tree.search(&k).unwrap().unwrap();
                assert_eq!(tree[u].key(), &k);
                assert_eq!(tree[u].value(), &k.to_string());
            }

            for k in [0, 31, 100] {
                assert_eq!(tree.search(&k).unwrap(), None);
                assert!(!tree.contains_key(&k));
            }
        }
    }

    #[test]
    fn bst_is_ordered() {
        let tree = random_bst(7);
        assert_eq!(tree.keys().copied().collect_vec(), (1..=30).collect_vec());

        for u in tree.as_tree().ids() {
            let key = tree[u].key();
            let node = &tree.as_tree()[u];
            if let Some(left) = node.child(0) {
                assert!(tree[left].key() < key);
            }
            if let Some(right) = node.child(1) {
                assert!(tree[right].key() > key);
            }
        }
    }

    #[test]
    fn bst_rejects_duplicates() {
        let mut tree = KeyTree::binary(5, 'a', false);
        tree.insert(3, 'b').unwrap();
        tree.insert(4, 'c').unwrap();

        assert!(tree.insert(5, 'x').unwrap_err().is_conflict());
        assert!(tree.insert(4, 'x').unwrap_err().is_conflict());
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[tree.search(&4).unwrap().unwrap()].value(), &'c');
    }

    #[test]
    fn bst_with_duplicates() {
        let mut tree = KeyTree::binary(5, 0, true);
        let first = tree.insert(7, 1).unwrap();
        let second = tree.insert(7, 2).unwrap();

        assert_eq!(tree.as_tree().parent(second), Some(first));
        assert_eq!(tree.search(&7).unwrap(), Some(first));
        assert_eq!(tree.iter().map(KeyNode::value).copied().collect_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn ternary_chains_equal_keys() {
        let mut tree = KeyTree::ternary('m', 0);
        tree.insert('c', 1).unwrap();
        tree.insert('x', 2).unwrap();
        let m1 = tree.insert('m', 3).unwrap();
        let m2 = tree.insert('m', 4).unwrap();
        tree.insert('c', 5).unwrap();

        assert_eq!(tree.as_tree()[0].slots(), &[Some(1), Some(m1), Some(2)]);
        assert_eq!(tree.search_all(&'m').unwrap(), vec![0, m1, m2]);
        assert_eq!(tree.search_all(&'c').unwrap().len(), 2);
        assert_eq!(tree.search_all(&'q').unwrap(), Vec::<NodeId>::new());
        assert_eq!(tree.keys().collect::<String>(), "ccmmmx");
    }

    #[test]
    fn mismatched_operations_fail() {
        let binary = KeyTree::new(1, (), 2, false).unwrap();
        let ternary = KeyTree::new(1, (), 3, false).unwrap();

        assert!(binary.search_all(&1).unwrap_err().is_invalid_configuration());
        assert!(ternary.search(&1).unwrap_err().is_invalid_configuration());
        assert!(ternary.duplicates());
        assert_eq!(ternary.branching(), Branching::Ternary);

        for slots in [0, 1, 4, 8] {
            assert!(KeyTree::new(1, (), slots, false).unwrap_err().is_invalid_configuration());
        }
    }

    #[test]
    fn display_keys() {
        let mut tree = KeyTree::binary(4, (), false);
        tree.insert(2, ()).unwrap();
        tree.insert(6, ()).unwrap();
        tree.insert(7, ()).unwrap();

        assert_eq!(tree.display(16), "        4\n    2       6\n              7");
    }
}
