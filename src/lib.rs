mod automaton;
mod determinize;
mod error;
mod options;
mod parse;

pub use automaton::{AutomatonError, Dfa, DfaState, Nfa, NfaState, State, StateSet, EPSILON};
pub use determinize::determinize;
pub use error::{ErrorRepr, PublicError};
pub use options::{Options, Traversal};
pub use parse::{parse_instance, Instance, ParseError};
