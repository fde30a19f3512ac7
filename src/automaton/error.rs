/// The error type that can occur when building an automaton
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("No state named `{0}`")]
    UnknownState(String),

    #[error("Invalid state name `{0}`: names must be non-empty and must not contain `[`, `]` or `,`")]
    InvalidName(String),

    #[error("The epsilon marker `{}` is not an input symbol", super::EPSILON)]
    EpsilonSymbol,

    #[error("Symbol `{0}` is not part of the alphabet")]
    UnknownSymbol(char),

    #[error("The automaton has no start state")]
    MissingStart,

    #[error("State `{state}` already moves to `{existing}` on `{symbol}`")]
    NonDeterministic {
        state: String,
        symbol: char,
        existing: String,
    },
}
