/*!
# Trees

Two families of trees are provided:

- **Positional trees**: [`CompleteTree`] stores an `N`-ary complete tree in a flat array and
  [`Heap`] layers a max-/min-priority queue on top of it via sift-up/sift-down.
- **Node trees**: [`Tree`] is an arena of explicit nodes with a fixed number of sparse child slots
  and parent back-references, [`KeyTree`] routes keyed nodes into binary or ternary slots to form
  search trees.

All trees can be rendered for diagnostics, one generation per line, via `display(width)`.
*/

mod complete;
mod display;
mod heap;
mod key_node;
mod node;

pub use complete::*;
pub use heap::*;
pub use key_node::*;
pub use node::*;
