use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

use indexmap::{IndexMap, IndexSet};

/// A named node of an automaton.
///
/// States are identified by their names alone.
/// Two states with the same name are considered equal, regardless of their transitions or of the automaton they belong to.
pub trait State {
    /// The name of the state.
    fn name(&self) -> &str;
}

/// Implements equality, ordering and hashing on the name of a state.
macro_rules! nominal_identity {
    ($state:ty) => {
        impl PartialEq for $state {
            fn eq(&self, other: &Self) -> bool {
                self.name() == other.name()
            }
        }

        impl Eq for $state {}

        impl Hash for $state {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name().hash(state)
            }
        }

        impl PartialOrd for $state {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $state {
            fn cmp(&self, other: &Self) -> Ordering {
                self.name().cmp(other.name())
            }
        }

        impl Display for $state {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

/// A state of a nondeterministic automaton.
/// Successors are referred to by name and may be many per symbol, including the epsilon marker.
#[derive(Clone, Debug)]
pub struct NfaState {
    name: String,
    transitions: IndexMap<char, IndexSet<String>>,
}

impl NfaState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: IndexMap::new(),
        }
    }

    /// Records that reading `symbol` in this state may lead to `target`.
    /// Repeated calls with the same symbol accumulate targets.
    pub fn add_transition(&mut self, symbol: char, target: &str) {
        self.transitions
            .entry(symbol)
            .or_default()
            .insert(target.to_string());
    }

    /// Returns the names of all successors on `symbol`.
    /// The iterator is empty if there are none.
    pub fn transitions(&self, symbol: char) -> impl Iterator<Item = &str> + '_ {
        self.transitions
            .get(&symbol)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Returns the symbols for which this state has at least one transition.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.transitions.keys().copied()
    }
}

impl State for NfaState {
    fn name(&self) -> &str {
        &self.name
    }
}

nominal_identity!(NfaState);

/// A state of a deterministic automaton, with at most one successor per symbol.
#[derive(Clone, Debug)]
pub struct DfaState {
    name: String,
    transitions: IndexMap<char, String>,
}

impl DfaState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: IndexMap::new(),
        }
    }

    /// Sets the successor on `symbol`, replacing the previous one.
    pub(crate) fn set_transition(&mut self, symbol: char, target: &str) {
        self.transitions.insert(symbol, target.to_string());
    }

    /// Returns the name of the successor on `symbol`, if any.
    pub fn transition(&self, symbol: char) -> Option<&str> {
        self.transitions.get(&symbol).map(String::as_str)
    }

    /// Returns all transitions of this state as `(symbol, successor)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.transitions.iter().map(|(c, t)| (*c, t.as_str()))
    }
}

impl State for DfaState {
    fn name(&self) -> &str {
        &self.name
    }
}

nominal_identity!(DfaState);
