/*!
`arbores` is a library of classic data structures meant for teaching and experimentation:
- **trees** stored as flat arrays or as arenas of nodes,
- **heaps** with arbitrary branching factor and either polarity,
- **graphs** with labelled edges and incremental or on-demand cycle detection,
- **automata** built on top of those graphs.

# Representation

Positional trees store their values in a `Vec` and navigate via index arithmetic: the children of
position `i` in an `N`-ary complete tree are `N*i + 1 ..= N*i + N`.
Node trees, graphs and automata refer to their elements by dense `u32` ids
([`NodeId`](tree::NodeId), [`VertexId`](graph::VertexId), [`StateId`](automata::StateId)), as
`u32` suffices for all practical sizes and saves space compared to `usize`.

Graph vertices are arbitrary hashable values and are interned to ids on insertion.

# Design

Structures are configured on construction or via the *Builder* / *Setter* pattern
(`Graph::dag().check_add(true)`) and then maintain their invariant incrementally.
All failures are reported as [`Error`]; a search that finds nothing returns `None` or an empty
`Vec` instead. Traversals never recurse, so deep trees and long paths are fine.

The library never installs a `tracing` subscriber; rejected insertions and detected cycles are
logged on the `debug` level.

# Usage

There are *3* core submodules:
- [`tree`] includes [`CompleteTree`](tree::CompleteTree), [`Heap`](tree::Heap),
  [`Tree`](tree::Tree) and [`KeyTree`](tree::KeyTree),
- [`graph`] includes the [`Graph`](graph::Graph) engine and its [`GraphKind`](graph::GraphKind)s,
- [`automata`] includes [`Fsa`](automata::Fsa), [`Fsm`](automata::Fsm) and
  [`Dafsa`](automata::Dafsa).

In most use-cases, `use arbores::prelude::*;` suffices.

```
use arbores::prelude::*;

let mut heap = Heap::default();
heap.extend([5, 3, 8, 1]);
assert_eq!(heap.pop(), Some(8));

let mut dag = Graph::dag().check_add(true);
dag.edge("a", "b", 1).unwrap();
assert!(dag.edge("b", "a", 2).unwrap_err().is_cycle());
```
*/

pub mod automata;
mod error;
pub mod graph;
pub(crate) mod testing;
pub mod tree;

pub use error::{Error, Result};

/// `arbores::prelude` includes the error type and all structures.
pub mod prelude {
    pub use super::{Error, automata::*, graph::*, tree::*};
}
