/*!
# DAFSA

A deterministic acyclic finite state acceptor stores a set of words like a trie but shares common
suffixes as well as common prefixes, leading to (the) minimal deterministic automaton of the set.

Construction follows the incremental algorithm for sorted input by Daciuk et al.: after each word,
the states of the previous word that can no longer change are either merged with an equivalent
registered state or registered themselves. Words must thus be inserted in strictly increasing
lexicographic order.

# Example
```
use arbores::automata::Dafsa;

let dafsa = Dafsa::from_strs(["tap", "taps", "top", "tops"]).unwrap();

assert!(dafsa.contains("tops".chars()));
assert!(!dafsa.contains("to".chars()));
assert_eq!(dafsa.number_of_states(), 5);
```
*/

use std::{
    fmt::{self, Debug},
    hash::Hash,
};

use fxhash::FxHashMap;
use tracing::{debug, trace};

use super::{START, StateBitSet, StateId};
use crate::{
    error::{Error, Result},
    graph::Graph,
};

/// State under construction; transitions are kept in increasing symbol order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DraftState<S> {
    accepting: bool,
    transitions: Vec<(S, StateId)>,
}

impl<S> Default for DraftState<S> {
    fn default() -> Self {
        Self {
            accepting: false,
            transitions: Vec::new(),
        }
    }
}

/// Incremental builder for a [`Dafsa`]
#[derive(Debug, Clone)]
pub struct DafsaBuilder<S> {
    states: Vec<DraftState<S>>,
    /// Canonical representative of every minimized state
    register: FxHashMap<DraftState<S>, StateId>,
    /// `(parent, child)` pairs along the path of the previous word, where `child` is the target of
    /// the last transition of `parent`; not yet minimized
    unchecked: Vec<(StateId, StateId)>,
    previous: Option<Vec<S>>,
    words: usize,
}

impl<S: Ord + Hash + Clone + Debug> Default for DafsaBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Ord + Hash + Clone + Debug> DafsaBuilder<S> {
    pub fn new() -> Self {
        Self {
            states: vec![DraftState::default()],
            register: FxHashMap::default(),
            unchecked: Vec::new(),
            previous: None,
            words: 0,
        }
    }

    /// Number of words inserted so far
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Adds `word` to the set.
    ///
    /// # Errors
    /// Returns [`Error::StructuralConflict`] if `word` is not strictly greater than the previously
    /// inserted word. The builder is left unchanged.
    pub fn insert<W>(&mut self, word: W) -> Result<()>
    where
        W: IntoIterator<Item = S>,
    {
        let word: Vec<S> = word.into_iter().collect();

        let common = match &self.previous {
            Some(previous) if word <= *previous => {
                debug!(word = ?word, previous = ?previous, "rejected unsorted word");
                let reason = if word == *previous {
                    "duplicate word"
                } else {
                    "word out of order"
                };
                return Err(Error::StructuralConflict(format!(
                    "{reason} {word:?}: words must be inserted in strictly increasing order after {previous:?}"
                )));
            }
            Some(previous) => previous
                .iter()
                .zip(&word)
                .take_while(|(a, b)| a == b)
                .count(),
            None => 0,
        };

        self.minimize(common);

        let mut state = self.unchecked.last().map_or(START, |&(_, child)| child);
        for symbol in &word[common..] {
            let child = self.states.len() as StateId;
            self.states.push(DraftState::default());
            self.states[state as usize]
                .transitions
                .push((symbol.clone(), child));
            self.unchecked.push((state, child));
            state = child;
        }
        self.states[state as usize].accepting = true;

        self.previous = Some(word);
        self.words += 1;
        Ok(())
    }

    /// Merges or registers all unchecked states deeper than `depth`
    fn minimize(&mut self, depth: usize) {
        while self.unchecked.len() > depth {
            let Some((parent, child)) = self.unchecked.pop() else {
                break;
            };

            match self.register.get(&self.states[child as usize]).copied() {
                Some(existing) => {
                    if let Some(last) = self.states[parent as usize].transitions.last_mut() {
                        last.1 = existing;
                    }
                }
                None => {
                    self.register
                        .insert(self.states[child as usize].clone(), child);
                }
            }
        }
    }

    /// Minimizes the remaining states and freezes the automaton.
    ///
    /// Reachable states are renumbered in breadth-first order starting with [`START`] and
    /// stored in a [`GraphKind::MultiDag`](crate::graph::GraphKind::MultiDag) graph whose
    /// acyclicity is verified.
    ///
    /// # Errors
    /// Returns [`Error::CycleDetected`] if the transition graph is not acyclic.
    pub fn build(mut self) -> Result<Dafsa<S>> {
        self.minimize(0);

        let mut ids: Vec<Option<StateId>> = vec![None; self.states.len()];
        let mut order = vec![START];
        ids[START as usize] = Some(START);

        let mut i = 0;
        while let Some(&state) = order.get(i) {
            for &(_, target) in &self.states[state as usize].transitions {
                if ids[target as usize].is_none() {
                    ids[target as usize] = Some(order.len() as StateId);
                    order.push(target);
                }
            }
            i += 1;
        }

        let mut graph = Graph::multi_dag();
        let mut accepting = StateBitSet::new(order.len() as StateId);
        for (new_id, &state) in order.iter().enumerate() {
            graph.add_vertex(new_id as StateId);
            if self.states[state as usize].accepting {
                accepting.set_bit(new_id as StateId);
            }
        }

        for (new_id, &state) in order.iter().enumerate() {
            for (symbol, target) in &self.states[state as usize].transitions {
                if let Some(target) = ids[*target as usize] {
                    graph.edge(new_id as StateId, target, symbol.clone())?;
                }
            }
        }

        graph.check_cycle()?;

        trace!(
            words = self.words,
            states = graph.number_of_vertices(),
            transitions = graph.number_of_edges(),
            "froze dafsa"
        );

        Ok(Dafsa {
            graph,
            accepting,
            words: self.words,
        })
    }
}

/// Deterministic acyclic finite state acceptor over symbols `S`
#[derive(Clone)]
pub struct Dafsa<S> {
    graph: Graph<StateId, S>,
    accepting: StateBitSet,
    words: usize,
}

impl<S: Debug> Debug for Dafsa<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dafsa")
            .field("words", &self.words)
            .field("accepting", &self.accepting.iter_set_bits().collect::<Vec<_>>())
            .field("graph", &self.graph)
            .finish()
    }
}

impl<S: Ord + Hash + Clone + Debug> Dafsa<S> {
    /// Builds the automaton of `words`, which must be strictly increasing.
    ///
    /// # Errors
    /// Returns [`Error::StructuralConflict`] on unsorted or duplicate words.
    pub fn from_words<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = S>,
    {
        let mut builder = DafsaBuilder::new();
        for word in words {
            builder.insert(word)?;
        }
        builder.build()
    }
}

impl Dafsa<char> {
    /// Builds the automaton of strictly increasing strings
    pub fn from_strs<'a, I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_words(words.into_iter().map(str::chars))
    }
}

impl<S> Dafsa<S> {
    /// Number of stored words
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    pub fn number_of_states(&self) -> usize {
        self.graph.number_of_vertices()
    }

    pub fn number_of_transitions(&self) -> usize {
        self.graph.number_of_edges()
    }

    /// The frozen transition graph; state [`START`] is its only root
    pub fn graph(&self) -> &Graph<StateId, S> {
        &self.graph
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        (state as usize) < self.number_of_states() && self.accepting.get_bit(state)
    }
}

impl<S: PartialEq + Clone> Dafsa<S> {
    /// The state reached from [`START`] by reading `prefix`, if any
    pub fn state_after<W>(&self, prefix: W) -> Option<StateId>
    where
        W: IntoIterator<Item = S>,
    {
        prefix.into_iter().try_fold(START, |state, symbol| {
            self.graph.follow(&state, &symbol).copied()
        })
    }

    /// Returns *true* if `word` is stored
    pub fn contains<W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = S>,
    {
        self.state_after(word)
            .is_some_and(|state| self.is_accepting(state))
    }

    /// All stored words in lexicographic order
    pub fn words(&self) -> Vec<Vec<S>> {
        self.completions(START, Vec::new())
    }

    /// All stored words starting with `prefix` in lexicographic order
    pub fn search<W>(&self, prefix: W) -> Vec<Vec<S>>
    where
        W: IntoIterator<Item = S>,
    {
        let prefix: Vec<S> = prefix.into_iter().collect();
        match self.state_after(prefix.iter().cloned()) {
            Some(state) => self.completions(state, prefix),
            None => Vec::new(),
        }
    }

    /// Enumerates all accepted words below `state`, each prefixed with `prefix`
    fn completions(&self, state: StateId, prefix: Vec<S>) -> Vec<Vec<S>> {
        let mut words = Vec::new();
        let mut stack = vec![(state, prefix)];

        while let Some((state, word)) = stack.pop() {
            let transitions: Vec<_> = self.graph.out_edges(&state).collect();
            for edge in transitions.into_iter().rev() {
                let mut next = word.clone();
                next.push(edge.value().clone());
                stack.push((*edge.dest(), next));
            }

            if self.is_accepting(state) {
                words.push(word);
            }
        }

        words
    }
}
