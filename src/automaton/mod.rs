//! Finite automata over `char` symbols.
//!
//! Both kinds of automata share the same notion of a state: a node identified by its name.
//! A [NfaState] may have any number of successors per symbol, a [DfaState] at most one.

mod dfa;
mod error;
mod nfa;
mod state;
mod subset;

pub use dfa::Dfa;
pub use error::AutomatonError;
pub use nfa::Nfa;
pub use state::{DfaState, NfaState, State};
pub use subset::StateSet;

/// The marker for epsilon transitions.
/// It is never part of the alphabet of an automaton.
pub const EPSILON: char = 'e';
