//! Determinization of epsilon-NFAs by the subset construction.
//!
//! Every state of the resulting automaton represents a set of NFA states that are active at the same time.
//! The state is named after the set (see [StateSet::canonical_name]), which is also the key used to detect sets that were already discovered.
//! This is sound because [Nfa] only accepts [valid names](StateSet::is_valid_name), for which distinct sets get distinct names.
//! A set is final iff it contains a final state of the NFA.
//!
//! Starting from the epsilon closure of the start state, discovered sets are expanded one at a time.
//! Each set is expanded exactly once, so the construction terminates after at most `2^n` expansions for an NFA with `n` states.

use std::collections::VecDeque;

use crate::{
    automaton::{AutomatonError, Dfa, Nfa, State, StateSet},
    options::{Options, Traversal},
};

/// The sets that have been discovered but not yet expanded.
struct Pending {
    queue: VecDeque<StateSet>,
    traversal: Traversal,
}

impl Pending {
    fn new(traversal: Traversal) -> Self {
        Self {
            queue: VecDeque::new(),
            traversal,
        }
    }

    fn push(&mut self, set: StateSet) {
        self.queue.push_back(set);
    }

    fn pop(&mut self) -> Option<StateSet> {
        match self.traversal {
            Traversal::DepthFirst => self.queue.pop_back(),
            Traversal::BreadthFirst => self.queue.pop_front(),
        }
    }
}

/// Adds the state representing `set` to the DFA.
/// Returns `false` if the state already exists.
fn materialize(nfa: &Nfa, dfa: &mut Dfa, set: &StateSet) -> bool {
    let name = set.canonical_name();
    let is_final = nfa.contains_final(set);
    let added = if is_final {
        dfa.add_final_state(&name)
    } else {
        dfa.add_state(&name)
    };
    if added {
        log::debug!("New state {} (final: {})", name, is_final);
    }
    added
}

/// Constructs a DFA that accepts the same language as `nfa`.
/// Fails only if the NFA has no start state.
pub fn determinize(nfa: &Nfa, options: &Options) -> Result<Dfa, AutomatonError> {
    let start = nfa.start_state().ok_or(AutomatonError::MissingStart)?;
    let mut dfa = Dfa::new(nfa.alphabet().clone());
    let mut pending = Pending::new(options.traversal);

    let initial = nfa.eclosure_of([start.name()]);
    let start_name = initial.canonical_name();
    materialize(nfa, &mut dfa, &initial);
    dfa.add_start_state(&start_name)?;
    pending.push(initial);

    while let Some(current) = pending.pop() {
        let from = current.canonical_name();
        for &symbol in nfa.alphabet() {
            let moved = nfa.move_on(&current, symbol);
            let target = nfa.eclosure_of(moved.iter());
            if target.is_empty() && !options.total {
                log::trace!("No transition from {} on {}", from, symbol);
                continue;
            }
            let to = target.canonical_name();
            if materialize(nfa, &mut dfa, &target) {
                pending.push(target);
            }
            if let Err(err) = dfa.add_transition(&from, symbol, &to) {
                unreachable!("Inconsistent subset construction: {}", err)
            }
            log::trace!("{} --{}--> {}", from, symbol, to);
        }
    }

    log::debug!(
        "Determinized automaton with {} states into {} states",
        nfa.all_states().count(),
        dfa.len()
    );
    Ok(dfa)
}
