use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use super::{AutomatonError, DfaState, State, EPSILON};

/// A deterministic finite automaton.
///
/// Instances are obtained from [Nfa::to_dfa](super::Nfa::to_dfa) and cannot be modified afterwards.
/// A missing transition rejects the input.
#[derive(Clone, Debug)]
pub struct Dfa {
    start: Option<String>,
    states: IndexMap<String, DfaState>,
    finals: IndexSet<String>,
    alphabet: IndexSet<char>,
}

impl Dfa {
    /// Creates an automaton over the given alphabet, without any states.
    pub(crate) fn new(alphabet: IndexSet<char>) -> Self {
        Self {
            start: None,
            states: IndexMap::new(),
            finals: IndexSet::new(),
            alphabet,
        }
    }

    /// Adds a non-final state.
    /// Returns `false` if a state with that name already exists, in which case nothing changes.
    pub(crate) fn add_state(&mut self, name: &str) -> bool {
        if self.states.contains_key(name) {
            return false;
        }
        self.states.insert(name.to_string(), DfaState::new(name));
        true
    }

    /// Adds a final state.
    /// Returns `false` if a state with that name already exists, in which case nothing changes.
    pub(crate) fn add_final_state(&mut self, name: &str) -> bool {
        if !self.add_state(name) {
            return false;
        }
        self.finals.insert(name.to_string());
        true
    }

    /// Marks an existing state as the start state.
    pub(crate) fn add_start_state(&mut self, name: &str) -> Result<(), AutomatonError> {
        if !self.states.contains_key(name) {
            return Err(AutomatonError::UnknownState(name.to_string()));
        }
        self.start = Some(name.to_string());
        Ok(())
    }

    /// Adds the transition `from --symbol--> to`.
    /// Adding a transition that already exists is a no-op, but a different successor for the same state and symbol is rejected.
    pub(crate) fn add_transition(
        &mut self,
        from: &str,
        symbol: char,
        to: &str,
    ) -> Result<(), AutomatonError> {
        if symbol == EPSILON {
            return Err(AutomatonError::EpsilonSymbol);
        }
        if !self.alphabet.contains(&symbol) {
            return Err(AutomatonError::UnknownSymbol(symbol));
        }
        if !self.states.contains_key(to) {
            return Err(AutomatonError::UnknownState(to.to_string()));
        }
        let state = self
            .states
            .get_mut(from)
            .ok_or_else(|| AutomatonError::UnknownState(from.to_string()))?;
        if let Some(existing) = state.transition(symbol) {
            if existing != to {
                return Err(AutomatonError::NonDeterministic {
                    state: from.to_string(),
                    symbol,
                    existing: existing.to_string(),
                });
            }
            return Ok(());
        }
        state.set_transition(symbol, to);
        Ok(())
    }

    /// Returns the name of the start state.
    pub fn start_state(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Returns all states, final and non-final, in the order they were added.
    pub fn states(&self) -> impl Iterator<Item = &DfaState> + '_ {
        self.states.values()
    }

    pub fn state(&self, name: &str) -> Option<&DfaState> {
        self.states.get(name)
    }

    pub fn final_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.finals.iter().map(String::as_str)
    }

    pub fn is_final(&self, name: &str) -> bool {
        self.finals.contains(name)
    }

    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the successor of `from` on `symbol`, if any.
    pub fn transition(&self, from: &str, symbol: char) -> Option<&str> {
        self.states.get(from)?.transition(symbol)
    }

    /// Returns the state reached after reading `word` from the start state.
    /// Returns `None` if a transition is missing on the way.
    pub fn run(&self, word: &str) -> Option<&str> {
        let mut current = self.start.as_deref()?;
        for c in word.chars() {
            current = self.transition(current, c)?;
        }
        Some(current)
    }

    /// Decides whether the automaton accepts the word.
    pub fn accepts(&self, word: &str) -> bool {
        self.run(word).map_or(false, |s| self.is_final(s))
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Q = {{ {} }}", self.states.keys().join(" "))?;
        writeln!(f, "Sigma = {{ {} }}", self.alphabet.iter().join(" "))?;
        writeln!(f, "delta =")?;
        writeln!(f, "\t\t{}", self.alphabet.iter().join("\t"))?;
        for state in self.states.values() {
            let row = self
                .alphabet
                .iter()
                .map(|c| state.transition(*c).unwrap_or("-"))
                .join("\t");
            writeln!(f, "\t{}\t{}", state.name(), row)?;
        }
        writeln!(f, "q0 = {}", self.start.as_deref().unwrap_or("-"))?;
        write!(f, "F = {{ {} }}", self.finals.iter().join(" "))
    }
}
