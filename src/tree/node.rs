/*!
# Node Trees

Explicit trees where every node holds a value and a fixed number of (possibly empty) child slots.

Nodes live in a central arena owned by the [`Tree`] and are addressed by [`NodeId`]. A node owns
its children through the slot array, while the parent is only stored as a back-reference (an id),
which is enough to answer generation and sibling queries without any ownership cycles.

Nodes are never removed: the tree only grows.

# Example
```
use arbores::tree::Tree;

let mut tree = Tree::new("root", 2).unwrap();
let a = tree.insert("a");
let b = tree.insert("b");
let c = tree.insert("c");

assert_eq!(tree.parent(c), Some(a));
assert_eq!(tree.siblings(a), vec![b]);
assert_eq!(tree.generation(c), 2);
```
*/

use std::{
    collections::VecDeque,
    fmt::Display,
    ops::{Index, Range},
};

use smallvec::{SmallVec, smallvec};

use crate::{
    error::{Error, Result, raise_error_unless},
    tree::display::{Span, render_levels},
};

/// Nodes are addressed by their position in the arena
pub type NodeId = u32;

/// The root of every [`Tree`]
pub const ROOT: NodeId = 0;

/// A value together with its child slots and a back-reference to its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    children: SmallVec<[Option<NodeId>; 4]>,
}

impl<T> Node<T> {
    fn new(value: T, parent: Option<NodeId>, child_slots: usize) -> Self {
        Self {
            value,
            parent,
            children: smallvec![None; child_slots],
        }
    }

    /// Returns the stored value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the parent or `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child stored in `slot`
    pub fn child(&self, slot: usize) -> Option<NodeId> {
        self.children.get(slot).copied().flatten()
    }

    /// Returns all slots including empty ones
    pub fn slots(&self) -> &[Option<NodeId>] {
        &self.children
    }

    /// Iterates over all occupied slots from left to right
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }

    /// Returns the leftmost empty slot
    pub fn open_slot(&self) -> Option<usize> {
        self.children.iter().position(Option::is_none)
    }

    /// Returns *true* if no slot is occupied
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Arena of [`Node`]s forming a single rooted tree with a fixed branching factor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
    child_slots: usize,
}

impl<T> Tree<T> {
    /// Creates a tree consisting of only the root.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] if `child_slots == 0`.
    pub fn new(root: T, child_slots: usize) -> Result<Self> {
        raise_error_unless!(
            child_slots > 0,
            InvalidConfiguration,
            "a node needs at least one child slot"
        );

        Ok(Self::from_root(root, child_slots))
    }

    /// Creates a tree consisting of only the root without validating `child_slots`
    pub(crate) fn from_root(root: T, child_slots: usize) -> Self {
        debug_assert!(child_slots > 0);
        Self {
            nodes: vec![Node::new(root, None, child_slots)],
            child_slots,
        }
    }

    /// Returns the number of child slots per node
    pub fn child_slots(&self) -> usize {
        self.child_slots
    }

    /// Returns the number of nodes (at least 1)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always contains its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the root id
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Returns the node with id `u`
    pub fn get(&self, u: NodeId) -> Option<&Node<T>> {
        self.nodes.get(u as usize)
    }

    /// Returns the value of node `u`
    pub fn value(&self, u: NodeId) -> Option<&T> {
        self.get(u).map(Node::value)
    }

    /// Returns a mutable reference to the value of node `u`
    pub fn value_mut(&mut self, u: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(u as usize).map(|node| &mut node.value)
    }

    /// Iterates over all ids in insertion order
    pub fn ids(&self) -> Range<NodeId> {
        0..self.nodes.len() as NodeId
    }

    /// Places `value` into `slot` of `parent`.
    ///
    /// # Errors
    /// - [`Error::InvalidConfiguration`] if `parent` does not exist or `slot >= child_slots`
    /// - [`Error::StructuralConflict`] if the slot is already occupied
    pub fn set_child(&mut self, parent: NodeId, slot: usize, value: T) -> Result<NodeId> {
        raise_error_unless!(
            slot < self.child_slots,
            InvalidConfiguration,
            "slot {slot} exceeds the {} child slots of the tree",
            self.child_slots
        );

        let id = self.nodes.len() as NodeId;
        let target = self
            .nodes
            .get_mut(parent as usize)
            .ok_or_else(|| Error::InvalidConfiguration(format!("unknown node {parent}")))?;

        raise_error_unless!(
            target.children[slot].is_none(),
            StructuralConflict,
            "slot {slot} of node {parent} is already occupied"
        );

        target.children[slot] = Some(id);
        self.nodes.push(Node::new(value, Some(parent), self.child_slots));
        Ok(id)
    }

    /// Places `value` into the leftmost empty slot of `parent`.
    /// Returns `None` (dropping `value`) if `parent` does not exist or has no empty slot.
    pub fn add_child(&mut self, parent: NodeId, value: T) -> Option<NodeId> {
        let slot = self.get(parent)?.open_slot()?;
        self.set_child(parent, slot, value).ok()
    }

    /// Places `value` into the first empty slot found in breadth-first order.
    /// As leaves always have empty slots, this never fails.
    pub fn insert(&mut self, value: T) -> NodeId {
        let (parent, slot) = self
            .bfs()
            .find_map(|u| self.nodes[u as usize].open_slot().map(|slot| (u, slot)))
            .unwrap_or((ROOT, 0));

        let id = self.nodes.len() as NodeId;
        self.nodes[parent as usize].children[slot] = Some(id);
        self.nodes.push(Node::new(value, Some(parent), self.child_slots));
        id
    }

    /// Returns the parent of `u`
    pub fn parent(&self, u: NodeId) -> Option<NodeId> {
        self.get(u)?.parent
    }

    /// Iterates over the children of `u` (empty if `u` does not exist)
    pub fn children(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(u).into_iter().flat_map(|node| node.children())
    }

    /// Returns all other children of the parent of `u`
    pub fn siblings(&self, u: NodeId) -> Vec<NodeId> {
        self.parent(u)
            .map(|p| self.children(p).filter(|&v| v != u).collect())
            .unwrap_or_default()
    }

    /// Returns the number of edges between `u` and the root
    pub fn generation(&self, u: NodeId) -> usize {
        std::iter::successors(self.parent(u), |&p| self.parent(p)).count()
    }

    /// Groups all nodes by generation
    pub fn generations(&self) -> Vec<Vec<NodeId>> {
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        for u in self.bfs() {
            let g = self.generation(u);
            if levels.len() <= g {
                levels.push(Vec::new());
            }
            levels[g].push(u);
        }
        levels
    }

    /// Iterates over all nodes in breadth-first order starting at the root
    pub fn bfs(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut queue = VecDeque::from([ROOT]);
        std::iter::from_fn(move || {
            let u = queue.pop_front()?;
            queue.extend(self.children(u));
            Some(u)
        })
    }

    /// Iterates over all nodes in depth-first pre-order starting at the root
    pub fn dfs(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![ROOT];
        std::iter::from_fn(move || {
            let u = stack.pop()?;
            let children: SmallVec<[NodeId; 4]> = self.children(u).collect();
            stack.extend(children.into_iter().rev());
            Some(u)
        })
    }

    /// Renders the tree one generation per line within `width` columns using `label` per value.
    /// Every slot owns an equal share of its parent's columns, so empty slots leave gaps.
    pub fn display_with<F, S>(&self, width: usize, label: F) -> String
    where
        F: Fn(&T) -> S,
        S: Display,
    {
        let mut levels: Vec<Vec<(Span, String)>> = Vec::new();
        let mut current = vec![(ROOT, Span::ROOT)];

        while !current.is_empty() {
            let mut next = Vec::new();
            let mut labels = Vec::with_capacity(current.len());

            for (u, span) in current {
                let node = &self.nodes[u as usize];
                labels.push((span, label(&node.value).to_string()));
                for (slot, child) in node.children.iter().enumerate() {
                    if let Some(child) = child {
                        next.push((*child, span.child(slot, self.child_slots)));
                    }
                }
            }

            levels.push(labels);
            current = next;
        }

        render_levels(&levels, width)
    }
}

impl<T: Display> Tree<T> {
    /// Renders the tree one generation per line within `width` columns
    pub fn display(&self, width: usize) -> String {
        self.display_with(width, |value: &T| value.to_string())
    }
}

impl<T> Index<NodeId> for Tree<T> {
    type Output = Node<T>;

    fn index(&self, u: NodeId) -> &Node<T> {
        &self.nodes[u as usize]
    }
}
