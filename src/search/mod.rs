//! Cheapest-assignment search for a single location.
//!
//! - [`AssignmentSearch`] — branch-and-bound over vehicles in descending
//!   length order, listings in ascending price order
//! - [`cheapest_assignment`] — convenience wrapper returning only the best
//! - [`SearchStatistics`] — node, pruning and solution counters

mod assignment;
mod stats;

pub use assignment::{cheapest_assignment, Assignment, AssignmentSearch, SearchResult};
pub use stats::SearchStatistics;
