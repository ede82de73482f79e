/*!
# Finite State Automata

State-transition graphs built on [`Graph`](crate::graph::Graph):

- [`Fsa`]: nondeterministic automaton with labelled transitions stored in a multi-graph.
  Acceptance is decided by simulating the set of active states.
- [`Fsm`]: deterministic machine with a cursor that is moved symbol by symbol.
- [`Dafsa`]: deterministic acyclic automaton recognizing a fixed set of words with as few states
  as possible. Built incrementally from sorted words by a [`DafsaBuilder`].

States are numbered `0, 1, ...` in order of creation; state [`START`] always exists.
*/

mod dafsa;
mod fsa;
mod fsm;

pub use dafsa::*;
pub use fsa::*;
pub use fsm::*;

use stream_bitset::bitset::BitSetImpl;

/// States are identified by dense `u32` ids
pub type StateId = u32;

/// Every automaton starts in state `0`
pub const START: StateId = 0;

/// BitSet over states
pub type StateBitSet = BitSetImpl<StateId>;
