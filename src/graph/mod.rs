/*!
# Graphs

A single engine [`Graph`] covers the classic family of edge-labelled graphs. Its [`GraphKind`]
decides which edges may be inserted and which acyclicity invariant is maintained:

| Kind                | parallel edges | acyclicity                |
|---------------------|----------------|---------------------------|
| `Simple`            | no             | none                      |
| `Multi`             | yes            | none                      |
| `AcyclicUndirected` | no             | no cycle when undirected  |
| `AcyclicDirected`   | no             | no directed cycle (DAG)   |
| `MultiDag`          | yes            | no directed cycle         |

Vertices are arbitrary hashable values that are interned to dense [`VertexId`]s.
Acyclicity is either validated on every insertion ([`Graph::check_add`]) or on demand via
[`Graph::check_cycle`].

# Example
```
use arbores::graph::*;

let mut dag = Graph::dag();
dag.edge(0, 1, 'a').unwrap();
dag.edge(1, 2, 'b').unwrap();
dag.edge(2, 0, 'c').unwrap();

assert!(dag.check_cycle().unwrap_err().is_cycle());
```
*/

mod cycle;
mod edge;
mod engine;
mod tie_break;
mod vertex;

pub use edge::*;
pub use engine::*;
pub use tie_break::*;
pub use vertex::*;

/// Vertices are interned to `u32` as we do not expect more than `2^32 - 1` distinct values
pub type VertexId = u32;

/// Which acyclicity invariant a graph maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Acyclicity {
    /// No cycle when every edge is read in both directions
    Undirected,
    /// No directed cycle
    Directed,
}

/// Insertion and cycle-check policy of a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphKind {
    /// At most one edge per ordered pair `(src, dest)`
    #[default]
    Simple,
    /// Parallel edges are allowed
    Multi,
    /// At most one edge per unordered pair, no undirected cycles, no self-loops
    AcyclicUndirected,
    /// At most one edge per ordered pair, no directed cycles, no self-loops
    AcyclicDirected,
    /// Parallel edges are allowed, no directed cycles, no self-loops
    MultiDag,
}

impl GraphKind {
    /// Returns *true* if more than one edge may connect the same pair of vertices
    pub const fn allows_parallel_edges(&self) -> bool {
        matches!(self, GraphKind::Multi | GraphKind::MultiDag)
    }

    /// The acyclicity invariant of this kind, if any
    pub const fn acyclicity(&self) -> Option<Acyclicity> {
        match self {
            GraphKind::Simple | GraphKind::Multi => None,
            GraphKind::AcyclicUndirected => Some(Acyclicity::Undirected),
            GraphKind::AcyclicDirected | GraphKind::MultiDag => Some(Acyclicity::Directed),
        }
    }

    /// Returns *true* if edges are read as ordered pairs
    pub const fn is_directed(&self) -> bool {
        !matches!(self, GraphKind::AcyclicUndirected)
    }
}
