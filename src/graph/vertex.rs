/*!
# Vertex Interning

Vertices are referenced by value, like set keys. Internally every distinct value is mapped to a
dense [`VertexId`] in insertion order so that traversals can work on plain `Vec`s instead of maps.
*/

use std::hash::Hash;

use fxhash::FxHashMap;

use super::VertexId;

/// Bidirectional map between vertex values and dense ids `0..len`
#[derive(Debug, Clone)]
pub struct VertexMap<V> {
    ids: FxHashMap<V, VertexId>,
    values: Vec<V>,
}

impl<V> Default for VertexMap<V> {
    fn default() -> Self {
        Self {
            ids: FxHashMap::default(),
            values: Vec::new(),
        }
    }
}

impl<V: Eq + Hash + Clone> VertexMap<V> {
    /// Returns the id of `value`, assigning the next free id if it is new
    pub fn intern(&mut self, value: V) -> VertexId {
        if let Some(&id) = self.ids.get(&value) {
            return id;
        }

        let id = self.values.len() as VertexId;
        self.ids.insert(value.clone(), id);
        self.values.push(value);
        id
    }

    /// Returns the id of `value` if it was interned before
    pub fn id_of(&self, value: &V) -> Option<VertexId> {
        self.ids.get(value).copied()
    }

    /// Forgets all values with id `>= len`
    pub fn truncate(&mut self, len: usize) {
        for value in self.values.drain(len.min(self.values.len())..) {
            self.ids.remove(&value);
        }
    }
}

impl<V> VertexMap<V> {
    /// Returns the value of `id`
    ///
    /// ** Panics if `id >= len` **
    pub fn value_of(&self, id: VertexId) -> &V {
        &self.values[id as usize]
    }

    /// Number of interned values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns *true* if nothing was interned yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in id order
    pub fn values(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    /// All ids `0..len`
    pub fn ids(&self) -> std::ops::Range<VertexId> {
        0..self.values.len() as VertexId
    }
}
