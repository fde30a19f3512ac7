const DEFAULT_TRAVERSAL: Traversal = Traversal::DepthFirst;
const DEFAULT_TOTAL: bool = false;

/// The order in which discovered subsets are expanded during determinization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Expand the most recently discovered subset first.
    DepthFirst,
    /// Expand subsets in the order they were discovered.
    BreadthFirst,
}

#[derive(Debug, Clone)]
pub struct Options {
    /// The order in which subsets are expanded.
    /// Only affects the order in which states are added to the resulting automaton, not the automaton itself.
    pub traversal: Traversal,
    /// Whether to make the transition function of the resulting automaton total.
    /// If set, the empty subset is added as a non-final sink state `[]` and every missing transition leads to it.
    /// Otherwise, missing transitions are left undefined and reject.
    pub total: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            traversal: DEFAULT_TRAVERSAL,
            total: DEFAULT_TOTAL,
        }
    }
}
