use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use quickcheck::{Arbitrary, Gen};

use crate::{determinize::determinize, options::Options};

use super::{AutomatonError, Dfa, NfaState, State, StateSet, EPSILON};

/// A nondeterministic finite automaton with epsilon transitions.
///
/// The automaton has a single start state, a set of final states and a set of ordinary states.
/// States are looked up by name, in the order start, finals, ordinary.
/// The alphabet consists of all symbols used in transitions, except [EPSILON].
#[derive(Clone, Debug, Default)]
pub struct Nfa {
    start: Option<NfaState>,
    finals: IndexMap<String, NfaState>,
    states: IndexMap<String, NfaState>,
    alphabet: IndexSet<char>,
}

impl Nfa {
    /// Creates an automaton without any states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start state.
    ///
    /// A previous start state with a different name stays part of the automaton: its transitions move to the state that now answers to its name, which is a new ordinary state if there is none.
    /// Setting the current start state again keeps it unchanged.
    pub fn add_start_state(&mut self, name: &str) -> Result<(), AutomatonError> {
        check_name(name)?;
        if self.start.as_ref().map_or(false, |s| s.name() == name) {
            return Ok(());
        }
        if let Some(old) = self.start.replace(NfaState::new(name)) {
            log::debug!("Start state {} replaced by {}", old, name);
            self.demote(old);
        }
        Ok(())
    }

    /// Adds an ordinary state.
    /// Adding a name that is already an ordinary state keeps the existing state.
    pub fn add_state(&mut self, name: &str) -> Result<(), AutomatonError> {
        check_name(name)?;
        self.states
            .entry(name.to_string())
            .or_insert_with(|| NfaState::new(name));
        Ok(())
    }

    /// Adds a final state.
    /// Adding a name that is already a final state keeps the existing state.
    pub fn add_final_state(&mut self, name: &str) -> Result<(), AutomatonError> {
        check_name(name)?;
        self.finals
            .entry(name.to_string())
            .or_insert_with(|| NfaState::new(name));
        Ok(())
    }

    fn demote(&mut self, old: NfaState) {
        if self.find_state(old.name()).is_none() {
            self.states.insert(old.name().to_string(), old);
            return;
        }
        if let Some(state) = self.find_state_mut(old.name()) {
            for symbol in old.symbols() {
                for target in old.transitions(symbol) {
                    state.add_transition(symbol, target);
                }
            }
        }
    }

    /// Adds a transition from `from` to `to` on `symbol`.
    /// If `symbol` is not [EPSILON], it is added to the alphabet.
    ///
    /// Both states must have been added before, otherwise an error is returned and the automaton is left unchanged.
    pub fn add_transition(&mut self, from: &str, symbol: char, to: &str) -> Result<(), AutomatonError> {
        if self.find_state(to).is_none() {
            return Err(AutomatonError::UnknownState(to.to_string()));
        }
        let state = self
            .find_state_mut(from)
            .ok_or_else(|| AutomatonError::UnknownState(from.to_string()))?;
        state.add_transition(symbol, to);
        if symbol != EPSILON {
            self.alphabet.insert(symbol);
        }
        log::trace!("Added transition {} --{}--> {}", from, symbol, to);
        Ok(())
    }

    /// Returns the state with the given name.
    /// The start state takes precedence over final states, which take precedence over ordinary states.
    pub fn find_state(&self, name: &str) -> Option<&NfaState> {
        match &self.start {
            Some(start) if start.name() == name => Some(start),
            _ => self.finals.get(name).or_else(|| self.states.get(name)),
        }
    }

    fn find_state_mut(&mut self, name: &str) -> Option<&mut NfaState> {
        match &mut self.start {
            Some(start) if start.name() == name => Some(start),
            _ => self
                .finals
                .get_mut(name)
                .or_else(|| self.states.get_mut(name)),
        }
    }

    pub fn start_state(&self) -> Option<&NfaState> {
        self.start.as_ref()
    }

    pub fn final_states(&self) -> impl Iterator<Item = &NfaState> + '_ {
        self.finals.values()
    }

    /// Returns the ordinary states, i.e., the states that were added with [add_state](Self::add_state).
    pub fn states(&self) -> impl Iterator<Item = &NfaState> + '_ {
        self.states.values()
    }

    /// Returns every state once, in lookup order.
    pub fn all_states(&self) -> impl Iterator<Item = &NfaState> + '_ {
        self.start
            .iter()
            .chain(self.finals.values())
            .chain(self.states.values())
            .unique_by(|s| s.name().to_string())
    }

    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    pub fn is_final(&self, name: &str) -> bool {
        self.finals.contains_key(name)
    }

    /// Returns true iff the set contains at least one final state.
    pub fn contains_final(&self, set: &StateSet) -> bool {
        set.iter().any(|name| self.is_final(name))
    }

    /// Returns the direct successors of `from` on `symbol`, which may be [EPSILON].
    pub fn to_states(&self, from: &str, symbol: char) -> Result<StateSet, AutomatonError> {
        let state = self
            .find_state(from)
            .ok_or_else(|| AutomatonError::UnknownState(from.to_string()))?;
        Ok(state.transitions(symbol).collect())
    }

    /// Returns the epsilon closure of a state.
    /// The closure contains the state itself and every state reachable from it through any number of epsilon transitions.
    pub fn eclosure(&self, name: &str) -> Result<StateSet, AutomatonError> {
        if self.find_state(name).is_none() {
            return Err(AutomatonError::UnknownState(name.to_string()));
        }
        Ok(self.eclosure_of([name]))
    }

    /// Returns the union of the epsilon closures of the given states.
    /// Names that do not denote a state are kept but not followed.
    pub fn eclosure_of<'a>(&'a self, names: impl IntoIterator<Item = &'a str>) -> StateSet {
        let mut closure = StateSet::empty();
        let mut worklist = vec![];
        for name in names {
            if closure.insert(name) {
                worklist.push(name);
            }
        }
        while let Some(name) = worklist.pop() {
            let Some(state) = self.find_state(name) else {
                continue;
            };
            for next in state.transitions(EPSILON) {
                if closure.insert(next) {
                    worklist.push(next);
                }
            }
        }
        closure
    }

    /// Returns all states reachable from a member of `set` by a single transition on `symbol`.
    pub fn move_on(&self, set: &StateSet, symbol: char) -> StateSet {
        set.iter()
            .filter_map(|name| self.find_state(name))
            .flat_map(|state| state.transitions(symbol))
            .collect()
    }

    /// Decides whether the automaton accepts the word by tracking all active states.
    /// Characters outside the alphabet reject.
    pub fn accepts(&self, word: &str) -> bool {
        let Some(start) = &self.start else {
            return false;
        };
        let mut active = self.eclosure_of([start.name()]);
        for c in word.chars() {
            if !self.alphabet.contains(&c) {
                return false;
            }
            let moved = self.move_on(&active, c);
            active = self.eclosure_of(moved.iter());
            if active.is_empty() {
                return false;
            }
        }
        self.contains_final(&active)
    }

    /// Returns an equivalent deterministic automaton, using the default [Options].
    pub fn to_dfa(&self) -> Result<Dfa, AutomatonError> {
        self.to_dfa_with(&Options::default())
    }

    /// Returns an equivalent deterministic automaton.
    pub fn to_dfa_with(&self, options: &Options) -> Result<Dfa, AutomatonError> {
        determinize(self, options)
    }
}

fn check_name(name: &str) -> Result<(), AutomatonError> {
    if StateSet::is_valid_name(name) {
        Ok(())
    } else {
        Err(AutomatonError::InvalidName(name.to_string()))
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Q = {{ {} }}", self.all_states().join(" "))?;
        writeln!(f, "Sigma = {{ {} }}", self.alphabet.iter().join(" "))?;
        writeln!(f, "delta =")?;
        for state in self.all_states() {
            for symbol in state.symbols() {
                let targets: StateSet = state.transitions(symbol).collect();
                writeln!(f, "\t{}\t{}\t{{ {} }}", state, symbol, targets.iter().join(" "))?;
            }
        }
        match &self.start {
            Some(start) => writeln!(f, "q0 = {}", start)?,
            None => writeln!(f, "q0 = -")?,
        }
        write!(f, "F = {{ {} }}", self.finals.keys().join(" "))
    }
}

/* Arbitrary */

impl Arbitrary for Nfa {
    fn arbitrary(g: &mut Gen) -> Self {
        let names = ["q0", "q1", "q2", "q3", "q4"];
        let symbols = ['a', 'b', EPSILON];
        let n = 1 + usize::arbitrary(g) % names.len();

        let mut nfa = Nfa::new();
        let declare = |nfa: &mut Nfa, name: &str, is_final: bool| {
            let res = if is_final {
                nfa.add_final_state(name)
            } else {
                nfa.add_state(name)
            };
            res.expect("state names are valid")
        };
        nfa.add_start_state(names[0]).expect("state names are valid");
        if bool::arbitrary(g) {
            declare(&mut nfa, names[0], true);
        }
        for name in &names[1..n] {
            declare(&mut nfa, name, bool::arbitrary(g));
        }

        for _ in 0..usize::arbitrary(g) % (3 * n + 1) {
            let from = names[usize::arbitrary(g) % n];
            let to = names[usize::arbitrary(g) % n];
            let symbol = *g.choose(&symbols).unwrap();
            nfa.add_transition(from, symbol, to)
                .expect("states are declared before transitions");
        }
        nfa
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn set(names: &[&str]) -> StateSet {
        names.iter().copied().collect()
    }

    /// start -e-> m -e-> f
    fn epsilon_chain() -> Nfa {
        let mut nfa = Nfa::new();
        nfa.add_start_state("s").unwrap();
        nfa.add_state("m").unwrap();
        nfa.add_final_state("f").unwrap();
        nfa.add_transition("s", EPSILON, "m").unwrap();
        nfa.add_transition("m", EPSILON, "f").unwrap();
        nfa
    }

    #[test]
    fn test_add_transition_extends_alphabet() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_final_state("q").unwrap();
        nfa.add_transition("p", 'a', "q").unwrap();
        nfa.add_transition("q", 'b', "p").unwrap();
        nfa.add_transition("q", 'a', "q").unwrap();
        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a', 'b']);
    }

    #[test]
    fn test_epsilon_not_in_alphabet() {
        let nfa = epsilon_chain();
        assert!(nfa.alphabet().is_empty());
    }

    #[test]
    fn test_add_transition_unknown_from() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        let res = nfa.add_transition("x", 'a', "p");
        assert_eq!(res, Err(AutomatonError::UnknownState("x".to_string())));
        assert!(nfa.alphabet().is_empty());
    }

    #[test]
    fn test_add_transition_unknown_to_leaves_nfa_unchanged() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        let res = nfa.add_transition("p", 'a', "x");
        assert_eq!(res, Err(AutomatonError::UnknownState("x".to_string())));
        assert!(nfa.alphabet().is_empty());
        assert!(nfa.to_states("p", 'a').unwrap().is_empty());
    }

    #[test]
    fn test_add_start_state_replaces() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_start_state("q").unwrap();
        assert_eq!(nfa.start_state().map(|s| s.name()), Some("q"));
        assert_eq!(nfa.states().map(|s| s.name()).collect::<Vec<_>>(), vec!["p"]);
    }

    #[test]
    fn test_replaced_start_keeps_transitions() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_final_state("f").unwrap();
        nfa.add_transition("p", 'a', "f").unwrap();
        nfa.add_start_state("q").unwrap();
        nfa.add_transition("q", 'b', "p").unwrap();

        assert_eq!(nfa.to_states("p", 'a').unwrap(), set(&["f"]));
        assert!(nfa.accepts("ba"));
        assert!(!nfa.accepts("b"));
    }

    #[test]
    fn test_replaced_start_merges_into_same_name() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_final_state("p").unwrap();
        nfa.add_state("q").unwrap();
        nfa.add_transition("p", 'a', "q").unwrap();
        nfa.add_start_state("q").unwrap();

        assert_eq!(nfa.to_states("p", 'a').unwrap(), set(&["q"]));
        assert!(nfa.is_final("p"));
        assert_eq!(nfa.states().count(), 1);
    }

    #[test]
    fn test_add_start_state_again_keeps_transitions() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_transition("p", 'a', "p").unwrap();
        nfa.add_start_state("p").unwrap();
        assert_eq!(nfa.to_states("p", 'a').unwrap(), set(&["p"]));
        assert_eq!(nfa.states().count(), 0);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut nfa = Nfa::new();
        for name in ["", "a, b", "[p]", "p,q"] {
            let err = AutomatonError::InvalidName(name.to_string());
            assert_eq!(nfa.add_start_state(name), Err(err.clone()));
            assert_eq!(nfa.add_final_state(name), Err(err.clone()));
            assert_eq!(nfa.add_state(name), Err(err));
        }
        assert!(nfa.start_state().is_none());
        assert_eq!(nfa.all_states().count(), 0);
    }

    #[test]
    fn test_lookup_prefers_start_then_finals() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_final_state("p").unwrap();
        nfa.add_state("q").unwrap();
        nfa.add_final_state("q").unwrap();
        nfa.add_transition("p", 'a', "q").unwrap();
        nfa.add_transition("q", 'b', "p").unwrap();

        assert_eq!(nfa.to_states("p", 'a').unwrap(), set(&["q"]));
        assert_eq!(nfa.start_state().unwrap().transitions('a').count(), 1);
        assert_eq!(nfa.final_states().find(|s| s.name() == "q").unwrap().transitions('b').count(), 1);
        assert_eq!(nfa.states().next().unwrap().transitions('b').count(), 0);
        assert_eq!(nfa.all_states().count(), 2);
    }

    #[test]
    fn test_readding_state_keeps_transitions() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_state("q").unwrap();
        nfa.add_transition("q", 'a', "p").unwrap();
        nfa.add_state("q").unwrap();
        assert_eq!(nfa.to_states("q", 'a').unwrap(), set(&["p"]));
    }

    #[test]
    fn test_to_states_unknown() {
        let nfa = Nfa::new();
        assert!(matches!(nfa.to_states("p", 'a'), Err(AutomatonError::UnknownState(_))));
    }

    #[test]
    fn test_eclosure_is_transitive() {
        let nfa = epsilon_chain();
        assert_eq!(nfa.eclosure("s").unwrap(), set(&["s", "m", "f"]));
        assert_eq!(nfa.eclosure("m").unwrap(), set(&["m", "f"]));
        assert_eq!(nfa.eclosure("f").unwrap(), set(&["f"]));
    }

    #[test]
    fn test_eclosure_with_cycle() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("a").unwrap();
        nfa.add_state("b").unwrap();
        nfa.add_state("c").unwrap();
        nfa.add_transition("a", EPSILON, "b").unwrap();
        nfa.add_transition("b", EPSILON, "a").unwrap();
        nfa.add_transition("b", 'x', "c").unwrap();
        assert_eq!(nfa.eclosure("a").unwrap(), set(&["a", "b"]));
    }

    #[test]
    fn test_eclosure_unknown() {
        let nfa = epsilon_chain();
        assert_eq!(nfa.eclosure("x"), Err(AutomatonError::UnknownState("x".to_string())));
    }

    #[test]
    fn test_move_on() {
        let mut nfa = Nfa::new();
        nfa.add_start_state("p").unwrap();
        nfa.add_state("q").unwrap();
        nfa.add_state("r").unwrap();
        nfa.add_transition("p", 'a', "q").unwrap();
        nfa.add_transition("q", 'a', "r").unwrap();
        nfa.add_transition("q", 'a', "q").unwrap();
        assert_eq!(nfa.move_on(&set(&["p", "q"]), 'a'), set(&["q", "r"]));
        assert!(nfa.move_on(&set(&["p", "q"]), 'b').is_empty());
    }

    #[test]
    fn test_accepts_epsilon_chain() {
        let nfa = epsilon_chain();
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
    }

    #[test]
    fn test_accepts_without_start() {
        let mut nfa = Nfa::new();
        nfa.add_final_state("f").unwrap();
        assert!(!nfa.accepts(""));
    }

    #[test]
    fn test_display() {
        let nfa = epsilon_chain();
        let shown = nfa.to_string();
        assert!(shown.starts_with("Q = { s f m }"));
        assert!(shown.contains("\ts\te\t{ m }"));
        assert!(shown.ends_with("F = { f }"));
    }

    #[quickcheck]
    fn eclosure_is_idempotent(nfa: Nfa) -> bool {
        nfa.all_states().all(|s| {
            let closure = nfa.eclosure(s.name()).unwrap();
            nfa.eclosure_of(closure.iter()) == closure
        })
    }

    #[quickcheck]
    fn eclosure_contains_state(nfa: Nfa) -> bool {
        nfa.all_states()
            .all(|s| nfa.eclosure(s.name()).unwrap().contains(s.name()))
    }
}
