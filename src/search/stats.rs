//! Search statistics.

use std::fmt;

/// Counters collected during one assignment search.
///
/// Statistics are informational only and never influence the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Search nodes visited, the root included.
    pub nodes_explored: u64,
    /// Candidates skipped because the listing had too little capacity left.
    pub prunings_capacity: u64,
    /// Candidates skipped because they could not beat the best cost.
    pub prunings_bound: u64,
    /// Complete assignments that improved on the best cost.
    pub solutions_found: u64,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_capacity(&mut self) {
        self.prunings_capacity = self.prunings_capacity.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    /// Adds another search's counters to these.
    pub fn merge(&mut self, other: &Self) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.prunings_capacity = self.prunings_capacity.saturating_add(other.prunings_capacity);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} pruned(capacity)={} pruned(bound)={} solutions={}",
            self.nodes_explored, self.prunings_capacity, self.prunings_bound, self.solutions_found
        )
    }
}
