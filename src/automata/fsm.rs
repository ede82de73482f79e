use tracing::debug;

use super::{Fsa, START, StateId, Walk};
use crate::error::{Error, Result};

/// Deterministic finite state machine with a cursor.
///
/// Every state has at most one transition per symbol. The cursor starts in [`START`] and is moved
/// by [`Fsm::step`] and [`Fsm::feed`].
///
/// # Example
/// ```
/// use arbores::automata::*;
///
/// let mut turnstile = Fsm::new();
/// let unlocked = turnstile.add_state(true);
/// turnstile.transition(START, unlocked, "coin").unwrap();
/// turnstile.transition(unlocked, START, "push").unwrap();
///
/// assert_eq!(turnstile.step(&"coin"), Some(unlocked));
/// assert!(turnstile.is_accepting());
/// assert_eq!(turnstile.step(&"coin"), None);
/// assert_eq!(turnstile.current(), unlocked);
/// ```
#[derive(Debug, Clone)]
pub struct Fsm<S> {
    automaton: Fsa<S>,
    current: StateId,
}

impl<S> Default for Fsm<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Fsm<S> {
    /// Creates a machine with the single non-accepting state [`START`]
    pub fn new() -> Self {
        Self {
            automaton: Fsa::new(),
            current: START,
        }
    }

    /// Adds a new state and returns its id
    pub fn add_state(&mut self, accepting: bool) -> StateId {
        self.automaton.add_state(accepting)
    }

    /// The state the cursor is in
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Returns *true* if the cursor is in an accepting state
    pub fn is_accepting(&self) -> bool {
        self.automaton.is_accepting(self.current)
    }

    /// Moves the cursor back to [`START`]
    pub fn reset(&mut self) {
        self.current = START;
    }

    /// The machine viewed as a (deterministic) [`Fsa`]
    pub fn as_fsa(&self) -> &Fsa<S> {
        &self.automaton
    }

    pub fn number_of_states(&self) -> usize {
        self.automaton.number_of_states()
    }

    /// Visits every state reachable from [`START`] exactly once
    pub fn walk(&self) -> Walk<'_, S> {
        self.automaton.walk()
    }
}

impl<S: PartialEq> Fsm<S> {
    /// Adds the transition `from -> to` on `symbol`.
    ///
    /// # Errors
    /// - [`Error::StructuralConflict`] if `from` already has a transition on `symbol`.
    /// - [`Error::InvalidConfiguration`] if one of the states does not exist.
    pub fn transition(&mut self, from: StateId, to: StateId, symbol: S) -> Result<()> {
        if let Some(existing) = self.target(from, &symbol) {
            debug!(from, existing, to, "rejected nondeterministic transition");
            return Err(Error::StructuralConflict(format!(
                "state {from} already moves to {existing} on this symbol"
            )));
        }
        self.automaton.transition(from, to, symbol)
    }

    /// The state reached from `state` on `symbol`, if any
    pub fn target(&self, state: StateId, symbol: &S) -> Option<StateId> {
        self.automaton.graph().follow(&state, symbol).copied()
    }

    /// Moves the cursor along the transition on `symbol` and returns the new state.
    /// Without such a transition, the cursor stays put and `None` is returned.
    pub fn step(&mut self, symbol: &S) -> Option<StateId> {
        let next = self.target(self.current, symbol)?;
        self.current = next;
        Some(next)
    }

    /// Steps through `input` and returns the final state.
    /// Stops at the first symbol without transition and returns `None`; the cursor then remains
    /// at the last state reached.
    pub fn feed<I>(&mut self, input: I) -> Option<StateId>
    where
        I: IntoIterator<Item = S>,
    {
        for symbol in input {
            self.step(&symbol)?;
        }
        Some(self.current)
    }

    /// Returns *true* if `input` leads from [`START`] to an accepting state.
    /// The cursor is not moved.
    pub fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = S>,
    {
        let mut state = START;
        for symbol in input {
            match self.target(state, &symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.automaton.is_accepting(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    /// Recognizes words over {a, b} with an even number of 'a's
    fn even_as() -> Fsm<char> {
        let mut fsm = Fsm::new();
        let odd = fsm.add_state(false);
        fsm.automaton.set_accepting(START, true).unwrap();
        fsm.transition(START, odd, 'a').unwrap();
        fsm.transition(odd, START, 'a').unwrap();
        fsm.transition(START, START, 'b').unwrap();
        fsm.transition(odd, odd, 'b').unwrap();
        fsm
    }

    #[test]
    fn cursor_moves() {
        let mut fsm = even_as();
        assert_eq!(fsm.current(), START);
        assert!(fsm.is_accepting());

        assert_eq!(fsm.step(&'a'), Some(1));
        assert!(!fsm.is_accepting());
        assert_eq!(fsm.feed("bba".chars()), Some(START));
        assert!(fsm.is_accepting());

        assert_eq!(fsm.step(&'c'), None);
        assert_eq!(fsm.current(), START);
    }

    #[test]
    fn feed_stops_at_missing_transition() {
        let mut fsm = even_as();
        assert_eq!(fsm.feed("abxa".chars()), None);
        assert_eq!(fsm.current(), 1);

        fsm.reset();
        assert_eq!(fsm.current(), START);
    }

    #[test]
    fn accepts_without_moving() {
        let fsm = even_as();
        assert!(fsm.accepts("abab".chars()));
        assert!(!fsm.accepts("ab".chars()));
        assert!(!fsm.accepts("ax".chars()));
        assert_eq!(fsm.current(), START);

        for word in ["", "b", "aa", "baab", "ababbb"] {
            assert_eq!(fsm.accepts(word.chars()), fsm.as_fsa().accepts(word.chars()));
        }
    }

    #[test]
    fn rejects_second_transition_on_symbol() {
        let mut fsm = even_as();
        let extra = fsm.add_state(true);

        let err = fsm.transition(START, extra, 'a').unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(fsm.target(START, &'a'), Some(1));
        assert_eq!(fsm.as_fsa().number_of_transitions(), 4);

        assert!(fsm.transition(START, extra, 'c').is_ok());
        assert!(
            fsm.transition(START, 9, 'd')
                .unwrap_err()
                .is_invalid_configuration()
        );
    }

    #[test]
    fn walk_in_order() {
        let fsm = even_as();
        assert_eq!(fsm.walk().collect_vec(), vec![START, 1]);
        assert_eq!(fsm.number_of_states(), 2);
    }
}
