use thiserror::Error;

use crate::{automaton::AutomatonError, parse::ParseError};

#[derive(Error, Debug)]
#[error(transparent)]
pub struct PublicError(#[from] pub ErrorRepr);

#[derive(Debug, Error)]
pub enum ErrorRepr {
    /// An error that occured while reading an automaton description.
    #[error("failed to load the automaton: {0}")]
    ParseError(ParseError),

    /// An error that occured while building or converting an automaton.
    #[error("invalid automaton: {0}")]
    AutomatonError(AutomatonError),

    #[error("i/o error: {0}")]
    IoError(std::io::Error),
}

// Resolve transitive conversion

impl From<ParseError> for PublicError {
    fn from(err: ParseError) -> Self {
        PublicError(ErrorRepr::ParseError(err))
    }
}

impl From<AutomatonError> for PublicError {
    fn from(err: AutomatonError) -> Self {
        PublicError(ErrorRepr::AutomatonError(err))
    }
}

impl From<std::io::Error> for PublicError {
    fn from(err: std::io::Error) -> Self {
        PublicError(ErrorRepr::IoError(err))
    }
}
