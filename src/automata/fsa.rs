use super::{START, StateBitSet, StateId};
use crate::{
    error::{Result, raise_error_unless},
    graph::Graph,
};

/// Nondeterministic finite state automaton.
///
/// Transitions are labelled edges of a multi-graph over the states, so a state may have several
/// transitions with the same symbol.
///
/// # Example
/// ```
/// use arbores::automata::*;
///
/// // accepts all words over {a, b} ending in "ab"
/// let mut fsa = Fsa::new();
/// let seen_a = fsa.add_state(false);
/// let done = fsa.add_state(true);
/// fsa.transition(START, START, 'a').unwrap();
/// fsa.transition(START, START, 'b').unwrap();
/// fsa.transition(START, seen_a, 'a').unwrap();
/// fsa.transition(seen_a, done, 'b').unwrap();
///
/// assert!(fsa.accepts("abab".chars()));
/// assert!(!fsa.accepts("aba".chars()));
/// ```
#[derive(Debug, Clone)]
pub struct Fsa<S> {
    graph: Graph<StateId, S>,
    accepting: Vec<bool>,
}

impl<S> Default for Fsa<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Fsa<S> {
    /// Creates an automaton with the single non-accepting state [`START`]
    pub fn new() -> Self {
        let mut graph = Graph::multi();
        graph.add_vertex(START);
        Self {
            graph,
            accepting: vec![false],
        }
    }

    /// Adds a new state and returns its id
    pub fn add_state(&mut self, accepting: bool) -> StateId {
        let state = self.accepting.len() as StateId;
        self.graph.add_vertex(state);
        self.accepting.push(accepting);
        state
    }

    pub fn number_of_states(&self) -> usize {
        self.accepting.len()
    }

    pub fn number_of_transitions(&self) -> usize {
        self.graph.number_of_edges()
    }

    pub fn contains_state(&self, state: StateId) -> bool {
        (state as usize) < self.accepting.len()
    }

    /// Returns *true* if `state` exists and is accepting
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.get(state as usize).copied().unwrap_or(false)
    }

    /// Changes whether `state` is accepting.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfiguration`] if `state` does not exist.
    pub fn set_accepting(&mut self, state: StateId, accepting: bool) -> Result<()> {
        raise_error_unless!(
            self.contains_state(state),
            InvalidConfiguration,
            "unknown state {state}"
        );
        self.accepting[state as usize] = accepting;
        Ok(())
    }

    /// Adds a transition `from -> to` on `symbol`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfiguration`] if one of the states does not exist.
    pub fn transition(&mut self, from: StateId, to: StateId, symbol: S) -> Result<()> {
        raise_error_unless!(
            self.contains_state(from) && self.contains_state(to),
            InvalidConfiguration,
            "transition {from} -> {to} refers to an unknown state ({} states exist)",
            self.number_of_states()
        );
        self.graph.edge(from, to, symbol)?;
        Ok(())
    }

    /// The underlying transition graph
    pub fn graph(&self) -> &Graph<StateId, S> {
        &self.graph
    }

    /// Symbols and targets of all transitions leaving `state` in insertion order
    pub fn transitions_of(&self, state: StateId) -> impl Iterator<Item = (&S, StateId)> {
        self.graph
            .out_edges(&state)
            .map(|edge| (edge.value(), *edge.dest()))
    }

    /// Visits every state reachable from [`START`] exactly once in depth-first order.
    /// Cycles are fine.
    pub fn walk(&self) -> Walk<'_, S> {
        Walk::new(self, START)
    }

    /// Returns the first state in [`Fsa::walk`] order that satisfies `predicate`
    pub fn search<P>(&self, mut predicate: P) -> Option<StateId>
    where
        P: FnMut(StateId) -> bool,
    {
        self.walk().find(|&state| predicate(state))
    }
}

impl<S: PartialEq> Fsa<S> {
    /// All states reachable from `state` by a single transition on `symbol`
    pub fn next_states<'a>(
        &'a self,
        state: StateId,
        symbol: &'a S,
    ) -> impl Iterator<Item = StateId> + use<'a, S> {
        self.graph
            .out_edges(&state)
            .filter(move |edge| edge.value() == symbol)
            .map(|edge| *edge.dest())
    }

    /// Returns *true* if some run on `input` ends in an accepting state
    pub fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = S>,
    {
        self.run(input)
            .is_some_and(|active| active.iter_set_bits().any(|state| self.is_accepting(state)))
    }

    /// Simulates all runs on `input` at once.
    /// Returns the set of active states or `None` if every run got stuck.
    pub fn run<I>(&self, input: I) -> Option<StateBitSet>
    where
        I: IntoIterator<Item = S>,
    {
        let n = self.number_of_states() as StateId;
        let mut active = StateBitSet::new(n);
        active.set_bit(START);

        for symbol in input {
            let mut next = StateBitSet::new(n);
            for state in active.iter_set_bits() {
                for target in self.next_states(state, &symbol) {
                    next.set_bit(target);
                }
            }

            if next.cardinality() == 0 {
                return None;
            }
            active = next;
        }

        Some(active)
    }
}

/// Depth-first iterator over the states reachable from a start state
pub struct Walk<'a, S> {
    fsa: &'a Fsa<S>,
    visited: StateBitSet,
    stack: Vec<StateId>,
}

impl<'a, S> Walk<'a, S> {
    fn new(fsa: &'a Fsa<S>, start: StateId) -> Self {
        let mut visited = StateBitSet::new(fsa.number_of_states() as StateId);
        visited.set_bit(start);
        Self {
            fsa,
            visited,
            stack: vec![start],
        }
    }
}

impl<S> Iterator for Walk<'_, S> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.stack.pop()?;

        // push in reverse so that earlier transitions are explored first
        let targets: Vec<StateId> = self.fsa.transitions_of(state).map(|(_, t)| t).collect();
        for &target in targets.iter().rev() {
            if !self.visited.set_bit(target) {
                self.stack.push(target);
            }
        }

        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unseen = self.fsa.number_of_states() - self.visited.cardinality() as usize;
        (self.stack.len(), Some(unseen + self.stack.len()))
    }
}
