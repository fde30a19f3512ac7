use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
};

use itertools::Itertools;
use quickcheck::Arbitrary;

/// A set of NFA state names, i.e., a state of the determinized automaton.
///
/// Members are kept sorted, so the [canonical name](Self::canonical_name) of a set only depends on its members and not on the order in which they were inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet {
    members: BTreeSet<String>,
}

impl StateSet {
    /// Creates the empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inserts a state name.
    /// Returns `true` if the name was not yet a member.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.members.contains(name) {
            false
        } else {
            self.members.insert(name.to_string())
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Iterates over the member names in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(String::as_str)
    }

    /// Returns true iff `name` may be used as the name of a state.
    ///
    /// Valid names are non-empty and contain none of `[`, `]` and `,`.
    /// For sets of valid names, [canonical_name](Self::canonical_name) is injective and never yields `[]` for a non-empty set.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains(&['[', ']', ','][..])
    }

    /// Returns the name of the DFA state that represents this set.
    ///
    /// The name lists the members in lexicographic order, separated by `, ` and enclosed in brackets.
    /// The empty set is named `[]`.
    ///
    /// # Example
    /// ```
    /// use nfa2dfa::StateSet;
    ///
    /// let set: StateSet = ["q", "p"].into_iter().collect();
    /// assert_eq!(set.canonical_name(), "[p, q]");
    /// assert_eq!(StateSet::empty().canonical_name(), "[]");
    /// ```
    pub fn canonical_name(&self) -> String {
        format!("[{}]", self.members.iter().join(", "))
    }
}

impl<'a> FromIterator<&'a str> for StateSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl<'a> Extend<&'a str> for StateSet {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/* Arbitrary */

impl Arbitrary for StateSet {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let names = &[
            "p", "q", "r", "s", "q0", "q1", "p10", "p2", "a", "b", "a, b", "", "[]",
        ];
        let mut set = Self::empty();
        for _ in 0..usize::arbitrary(g) % (names.len() + 1) {
            set.insert(g.choose(names).unwrap());
        }
        set
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let members: Vec<String> = self.members.iter().cloned().collect();
        Box::new(
            members
                .shrink()
                .map(|m| m.iter().map(String::as_str).collect()),
        )
    }
}
