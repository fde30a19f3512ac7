//! Loader for the line-based automaton format.
//!
//! ```text
//! b          final states, separated by whitespace
//! a          start state
//! c          other states, separated by whitespace
//! a0a a1b bec
//! 0          words to check, one per line
//! e          the empty word
//! ```
//!
//! Transitions are written as three characters `<from><symbol><to>`, so state names in this format are single characters.
//! The symbol `e` denotes an epsilon transition.

use std::io::BufRead;

use crate::{
    automaton::{AutomatonError, Nfa, EPSILON},
    error::PublicError,
};

/// The error type that can occur when reading an automaton description.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {0}: missing start state")]
    MissingStart(usize),

    #[error("line {line}: expected a single start state but got `{got}`")]
    MultipleStart { line: usize, got: String },

    #[error("line {line}: malformed transition `{token}`, expected `<from><symbol><to>`")]
    MalformedTransition { line: usize, token: String },

    #[error("line {line}: {source}")]
    Automaton {
        line: usize,
        #[source]
        source: AutomatonError,
    },
}

/// An automaton together with the words to check against it.
#[derive(Debug, Clone)]
pub struct Instance {
    pub nfa: Nfa,
    pub words: Vec<String>,
}

const FINALS_LINE: usize = 1;
const START_LINE: usize = 2;
const STATES_LINE: usize = 3;
const TRANSITIONS_LINE: usize = 4;

/// Reads an instance from the given reader.
pub fn parse_instance(reader: impl BufRead) -> Result<Instance, PublicError> {
    let mut lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    while lines.last().map_or(false, |l| l.trim().is_empty()) {
        lines.pop();
    }
    let line = |n: usize| lines.get(n - 1).map(|l| l.trim()).unwrap_or("");

    let at = |n: usize| move |source: AutomatonError| ParseError::Automaton { line: n, source };

    let mut nfa = Nfa::new();
    for name in line(FINALS_LINE).split_whitespace() {
        nfa.add_final_state(name).map_err(at(FINALS_LINE))?;
    }

    let start: Vec<&str> = line(START_LINE).split_whitespace().collect();
    match start.as_slice() {
        [] => return Err(ParseError::MissingStart(START_LINE).into()),
        [name] => nfa.add_start_state(name).map_err(at(START_LINE))?,
        _ => {
            return Err(ParseError::MultipleStart {
                line: START_LINE,
                got: line(START_LINE).to_string(),
            }
            .into())
        }
    }

    for name in line(STATES_LINE).split_whitespace() {
        nfa.add_state(name).map_err(at(STATES_LINE))?;
    }

    for token in line(TRANSITIONS_LINE).split_whitespace() {
        let (from, symbol, to) = split_transition(token).ok_or_else(|| {
            ParseError::MalformedTransition {
                line: TRANSITIONS_LINE,
                token: token.to_string(),
            }
        })?;
        nfa.add_transition(&from, symbol, &to)
            .map_err(at(TRANSITIONS_LINE))?;
    }

    let words: Vec<String> = lines
        .iter()
        .skip(TRANSITIONS_LINE)
        .map(|l| l.trim())
        .map(|w| if w.chars().eq([EPSILON]) { "" } else { w })
        .map(str::to_string)
        .collect();

    log::info!(
        "Loaded automaton with {} states over {} symbols and {} words",
        nfa.all_states().count(),
        nfa.alphabet().len(),
        words.len()
    );
    Ok(Instance { nfa, words })
}

fn split_transition(token: &str) -> Option<(String, char, String)> {
    let mut chars = token.chars();
    let from = chars.next()?;
    let symbol = chars.next()?;
    let to = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some((from.to_string(), symbol, to.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorRepr;

    fn parse(input: &str) -> Result<Instance, PublicError> {
        parse_instance(input.as_bytes())
    }

    #[test]
    fn test_parse_full() {
        let instance = parse("b\na\nc\na0a a1b bec\n0\n01\ne\n").unwrap();
        let nfa = &instance.nfa;
        assert_eq!(nfa.start_state().map(|s| s.to_string()), Some("a".to_string()));
        assert!(nfa.is_final("b"));
        assert_eq!(nfa.states().count(), 1);
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['0', '1']);
        assert_eq!(nfa.eclosure("b").unwrap().len(), 2);
        assert_eq!(instance.words, vec!["0", "01", ""]);
    }

    #[test]
    fn test_parse_without_words() {
        let instance = parse("b\na\n\na1b\n\n\n").unwrap();
        assert!(instance.words.is_empty());
        assert!(instance.nfa.accepts("1"));
    }

    #[test]
    fn test_parse_only_start() {
        let instance = parse("\na\n").unwrap();
        assert!(instance.nfa.alphabet().is_empty());
        assert!(!instance.nfa.accepts(""));
    }

    #[test]
    fn test_parse_missing_start() {
        let err = parse("b\n\n").unwrap_err();
        assert!(matches!(err.0, ErrorRepr::ParseError(ParseError::MissingStart(2))));
    }

    #[test]
    fn test_parse_multiple_start() {
        let err = parse("b\na c\n").unwrap_err();
        assert!(matches!(
            err.0,
            ErrorRepr::ParseError(ParseError::MultipleStart { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_malformed_transition() {
        let err = parse("b\na\n\na0\n").unwrap_err();
        match err.0 {
            ErrorRepr::ParseError(ParseError::MalformedTransition { line, token }) => {
                assert_eq!(line, 4);
                assert_eq!(token, "a0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_unknown_state() {
        let err = parse("b\na\n\na0x\n").unwrap_err();
        match err.0 {
            ErrorRepr::ParseError(ParseError::Automaton { line, source }) => {
                assert_eq!(line, 4);
                assert_eq!(source, AutomatonError::UnknownState("x".to_string()));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_invalid_state_name() {
        let err = parse("b\na\n, c\n").unwrap_err();
        match err.0 {
            ErrorRepr::ParseError(ParseError::Automaton { line, source }) => {
                assert_eq!(line, 3);
                assert_eq!(source, AutomatonError::InvalidName(",".to_string()));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_split_transition() {
        assert_eq!(
            split_transition("q0p"),
            Some(("q".to_string(), '0', "p".to_string()))
        );
        assert_eq!(split_transition("q0"), None);
        assert_eq!(split_transition("q0pp"), None);
    }
}
