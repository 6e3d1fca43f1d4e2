//! Branch-and-bound search for the cheapest listing assignment.
//!
//! Every vehicle must be placed in exactly one listing. A listing holds any
//! set of vehicles whose lengths sum to at most its capacity, and its price
//! is charged once, at the moment the first vehicle is placed in it.
//!
//! # Algorithm
//!
//! 1. Reject immediately if there are no listings or the summed capacity is
//!    below the summed vehicle length.
//! 2. Sort vehicles by descending length (stable).
//! 3. Depth-first over vehicles; at each vehicle try listings in catalog
//!    order (ascending price). A candidate whose tentative cost is already
//!    `>=` the best complete cost is skipped; prices are non-negative, so
//!    cost never decreases along a path.
//! 4. A complete assignment replaces the best only if strictly cheaper, so
//!    the first optimum found under this iteration order is kept.
//!
//! # Complexity
//!
//! O(m^n) in the worst case for m listings and n vehicles. Requests carry
//! at most five vehicles and the bound prunes most of the tree in practice.

use tracing::trace;

use super::stats::SearchStatistics;
use crate::models::{Listing, Vehicle};

/// The cheapest assignment found for one listing sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    total_price_in_cents: u64,
    listing_indices: Vec<usize>,
    listing_ids: Vec<String>,
}

impl Assignment {
    /// Sum of the prices of the opened listings.
    pub fn total_price_in_cents(&self) -> u64 {
        self.total_price_in_cents
    }

    /// Positions of the opened listings in the searched sequence, ascending.
    pub fn listing_indices(&self) -> &[usize] {
        &self.listing_indices
    }

    /// Ids of the opened listings, in ascending catalog order.
    pub fn listing_ids(&self) -> &[String] {
        &self.listing_ids
    }

    /// Consumes the assignment, returning `(total price, listing ids)`.
    pub fn into_parts(self) -> (u64, Vec<String>) {
        (self.total_price_in_cents, self.listing_ids)
    }
}

/// Result of a search: the best assignment, if any, and statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Cheapest feasible assignment, or `None` if infeasible.
    pub best: Option<Assignment>,
    /// Counters collected while searching.
    pub statistics: SearchStatistics,
}

/// Branch-and-bound search state for one vehicle multiset and one location.
///
/// Owns all mutable state (remaining capacities, opened flags, incumbent),
/// borrowing the listings read-only.
///
/// # Examples
///
/// ```
/// use u_storage::models::{Listing, Vehicle};
/// use u_storage::search::AssignmentSearch;
///
/// let listings = vec![
///     Listing::new("A", "L1", 10, 10, 100),
///     Listing::new("B", "L1", 10, 10, 100),
/// ];
/// let vehicles = vec![Vehicle::new(10), Vehicle::new(10)];
///
/// let result = AssignmentSearch::new(&vehicles, &listings).run();
/// let best = result.best.unwrap();
/// assert_eq!(best.total_price_in_cents(), 200);
/// assert_eq!(best.listing_ids(), ["A", "B"]);
/// ```
#[derive(Debug)]
pub struct AssignmentSearch<'a> {
    listings: &'a [Listing],
    lengths: Vec<u32>,
    remaining: Vec<u32>,
    opened: Vec<bool>,
    best_cost: Option<u64>,
    best_selection: Vec<usize>,
    statistics: SearchStatistics,
}

impl<'a> AssignmentSearch<'a> {
    /// Prepares a search. `listings` must be sorted by ascending price.
    pub fn new(vehicles: &[Vehicle], listings: &'a [Listing]) -> Self {
        let mut lengths: Vec<u32> = vehicles.iter().map(Vehicle::length).collect();
        lengths.sort_by(|a, b| b.cmp(a));

        Self {
            listings,
            lengths,
            remaining: listings.iter().map(Listing::capacity).collect(),
            opened: vec![false; listings.len()],
            best_cost: None,
            best_selection: Vec::new(),
            statistics: SearchStatistics::default(),
        }
    }

    /// Returns `true` if the instance passes the constant-time capacity check.
    fn may_be_feasible(&self, vehicles_total: u64) -> bool {
        if self.listings.is_empty() {
            return false;
        }
        let capacity_total: u64 = self.listings.iter().map(|l| u64::from(l.capacity())).sum();
        capacity_total >= vehicles_total
    }

    /// Runs the search to completion.
    pub fn run(mut self) -> SearchResult {
        let vehicles_total: u64 = self.lengths.iter().map(|&l| u64::from(l)).sum();
        if !self.may_be_feasible(vehicles_total) {
            return SearchResult {
                best: None,
                statistics: self.statistics,
            };
        }

        self.descend(0, 0);
        trace!(statistics = %self.statistics, "assignment search finished");

        let best = self.best_cost.map(|cost| Assignment {
            total_price_in_cents: cost,
            listing_ids: self
                .best_selection
                .iter()
                .map(|&i| self.listings[i].id().to_string())
                .collect(),
            listing_indices: self.best_selection,
        });

        SearchResult {
            best,
            statistics: self.statistics,
        }
    }

    fn descend(&mut self, depth: usize, cost: u64) {
        self.statistics.on_node_explored();

        if depth == self.lengths.len() {
            if self.best_cost.map_or(true, |best| cost < best) {
                self.best_cost = Some(cost);
                self.best_selection = (0..self.opened.len()).filter(|&i| self.opened[i]).collect();
                self.statistics.on_solution_found();
            }
            return;
        }

        let need = self.lengths[depth];
        for i in 0..self.listings.len() {
            if self.remaining[i] < need {
                self.statistics.on_pruning_capacity();
                continue;
            }

            let was_opened = self.opened[i];
            let tentative = if was_opened {
                cost
            } else {
                cost.saturating_add(self.listings[i].price_in_cents())
            };
            if self.best_cost.is_some_and(|best| tentative >= best) {
                self.statistics.on_pruning_bound();
                continue;
            }

            self.remaining[i] -= need;
            self.opened[i] = true;
            self.descend(depth + 1, tentative);
            self.remaining[i] += need;
            self.opened[i] = was_opened;
        }
    }
}

/// Finds the cheapest assignment of `vehicles` into `listings`.
///
/// `listings` must be sorted by ascending price. Returns `None` if no
/// feasible assignment exists.
///
/// # Examples
///
/// ```
/// use u_storage::models::{Listing, Vehicle};
/// use u_storage::search::cheapest_assignment;
///
/// let listings = vec![Listing::new("C", "L1", 30, 10, 300)];
/// let vehicles = Vehicle::repeated(10, 3);
///
/// let best = cheapest_assignment(&vehicles, &listings).unwrap();
/// assert_eq!(best.total_price_in_cents(), 300);
/// assert_eq!(best.listing_ids(), ["C"]);
/// ```
pub fn cheapest_assignment(vehicles: &[Vehicle], listings: &[Listing]) -> Option<Assignment> {
    debug_assert!(listings
        .windows(2)
        .all(|w| w[0].price_in_cents() <= w[1].price_in_cents()));
    AssignmentSearch::new(vehicles, listings).run().best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::can_pack;
    use proptest::prelude::*;

    fn listing(id: &str, length: u32, price: u64) -> Listing {
        Listing::new(id, "L1", length, 10, price)
    }

    fn brute_force(vehicles: &[Vehicle], listings: &[Listing]) -> Option<u64> {
        fn go(
            idx: usize,
            vehicles: &[Vehicle],
            listings: &[Listing],
            load: &mut [u64],
            best: &mut Option<u64>,
        ) {
            if idx == vehicles.len() {
                let cost = listings
                    .iter()
                    .zip(load.iter())
                    .filter(|(_, load)| **load > 0)
                    .map(|(listing, _)| listing.price_in_cents())
                    .sum::<u64>();
                if best.map_or(true, |b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            let len = u64::from(vehicles[idx].length());
            for i in 0..listings.len() {
                if load[i] + len <= u64::from(listings[i].capacity()) {
                    load[i] += len;
                    go(idx + 1, vehicles, listings, load, best);
                    load[i] -= len;
                }
            }
        }
        let mut best = None;
        go(0, vehicles, listings, &mut vec![0; listings.len()], &mut best);
        best
    }

    #[test]
    fn test_single_vehicle_single_listing() {
        let listings = vec![listing("A", 20, 500)];
        let best = cheapest_assignment(&[Vehicle::new(15)], &listings).expect("feasible");
        assert_eq!(best.total_price_in_cents(), 500);
        assert_eq!(best.listing_ids(), ["A"]);
        assert_eq!(best.listing_indices(), [0]);
    }

    #[test]
    fn test_two_listings_needed() {
        let listings = vec![listing("A", 10, 100), listing("B", 10, 100)];
        let best = cheapest_assignment(&Vehicle::repeated(10, 2), &listings).expect("feasible");
        assert_eq!(best.total_price_in_cents(), 200);
        assert_eq!(best.listing_ids(), ["A", "B"]);
    }

    #[test]
    fn test_price_charged_once() {
        let listings = vec![listing("C", 30, 300)];
        let best = cheapest_assignment(&Vehicle::repeated(10, 3), &listings).expect("feasible");
        assert_eq!(best.total_price_in_cents(), 300);
        assert_eq!(best.listing_ids(), ["C"]);
    }

    #[test]
    fn test_empty_listings_infeasible() {
        let result = AssignmentSearch::new(&[Vehicle::new(5)], &[]).run();
        assert!(result.best.is_none());
        assert_eq!(result.statistics.nodes_explored, 0);
    }

    #[test]
    fn test_capacity_fast_rejection() {
        let listings = vec![listing("A", 10, 1), listing("B", 10, 1)];
        let result = AssignmentSearch::new(&Vehicle::repeated(7, 3), &listings).run();
        assert!(result.best.is_none());
        assert_eq!(result.statistics.nodes_explored, 0);
    }

    #[test]
    fn test_enough_total_capacity_but_infeasible() {
        // 15 + 15 = 30 <= 20 + 10, yet no listing but A holds a 15.
        let listings = vec![listing("A", 20, 1), listing("B", 10, 1)];
        let result = AssignmentSearch::new(&Vehicle::repeated(15, 2), &listings).run();
        assert!(result.best.is_none());
        assert!(result.statistics.nodes_explored > 0);
    }

    #[test]
    fn test_cheaper_shared_listing_beats_two_cheap() {
        let listings = vec![listing("A", 10, 100), listing("C", 10, 100), listing("B", 20, 150)];
        let best = cheapest_assignment(&Vehicle::repeated(10, 2), &listings).expect("feasible");
        assert_eq!(best.total_price_in_cents(), 150);
        assert_eq!(best.listing_ids(), ["B"]);
    }

    #[test]
    fn test_first_optimum_kept_on_ties() {
        // P+Q and R both cost 100; P+Q is reached first.
        let listings = vec![listing("P", 10, 50), listing("Q", 10, 50), listing("R", 20, 100)];
        let best = cheapest_assignment(&Vehicle::repeated(10, 2), &listings).expect("feasible");
        assert_eq!(best.total_price_in_cents(), 100);
        assert_eq!(best.listing_ids(), ["P", "Q"]);
    }

    #[test]
    fn test_equal_price_listings_pick_first() {
        let listings = vec![listing("X", 20, 100), listing("Y", 20, 100)];
        let best = cheapest_assignment(&[Vehicle::new(5)], &listings).expect("feasible");
        assert_eq!(best.listing_ids(), ["X"]);
    }

    #[test]
    fn test_ids_in_catalog_order_not_placement_order() {
        // The 15 is placed first (into T), but ids follow catalog order.
        let listings = vec![listing("S", 5, 10), listing("T", 15, 20)];
        let best =
            cheapest_assignment(&[Vehicle::new(5), Vehicle::new(15)], &listings).expect("feasible");
        assert_eq!(best.listing_ids(), ["S", "T"]);
        assert_eq!(best.total_price_in_cents(), 30);
    }

    #[test]
    fn test_free_listings() {
        let listings = vec![listing("F", 10, 0), listing("G", 10, 0)];
        let best = cheapest_assignment(&Vehicle::repeated(10, 2), &listings).expect("feasible");
        assert_eq!(best.total_price_in_cents(), 0);
        assert_eq!(best.listing_ids(), ["F", "G"]);
    }

    #[test]
    fn test_no_vehicles_costs_nothing() {
        let listings = vec![listing("A", 10, 100)];
        let best = cheapest_assignment(&[], &listings).expect("trivially feasible");
        assert_eq!(best.total_price_in_cents(), 0);
        assert!(best.listing_ids().is_empty());
    }

    #[test]
    fn test_bound_prunes() {
        let listings: Vec<Listing> = (0..6)
            .map(|i| listing(&format!("l{i}"), 50, 100 + i as u64))
            .collect();
        let result = AssignmentSearch::new(&Vehicle::repeated(10, 5), &listings).run();
        let best = result.best.expect("feasible");
        assert_eq!(best.total_price_in_cents(), 100);
        assert!(result.statistics.prunings_bound > 0);
        assert_eq!(result.statistics.solutions_found, 1);
    }

    #[test]
    fn test_into_parts() {
        let listings = vec![listing("A", 20, 500)];
        let best = cheapest_assignment(&[Vehicle::new(15)], &listings).expect("feasible");
        assert_eq!(best.into_parts(), (500, vec!["A".to_string()]));
    }

    fn instance() -> impl Strategy<Value = (Vec<Vehicle>, Vec<Listing>)> {
        let vehicles = prop::collection::vec(1u32..30, 1..5)
            .prop_map(|ls| ls.into_iter().map(Vehicle::new).collect::<Vec<_>>());
        let listings = prop::collection::vec((1u32..40, 0u64..500), 0..6).prop_map(|raw| {
            let mut listings: Vec<Listing> = raw
                .into_iter()
                .enumerate()
                .map(|(i, (len, price))| listing(&format!("l{i}"), len, price))
                .collect();
            listings.sort_by_key(|l| l.price_in_cents());
            listings
        });
        (vehicles, listings)
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force((vehicles, listings) in instance()) {
            let found = cheapest_assignment(&vehicles, &listings);
            let expected = brute_force(&vehicles, &listings);
            prop_assert_eq!(found.as_ref().map(Assignment::total_price_in_cents), expected);
        }

        #[test]
        fn prop_price_is_sum_of_distinct_listings((vehicles, listings) in instance()) {
            if let Some(best) = cheapest_assignment(&vehicles, &listings) {
                let sum: u64 = best
                    .listing_indices()
                    .iter()
                    .map(|&i| listings[i].price_in_cents())
                    .sum();
                prop_assert_eq!(sum, best.total_price_in_cents());
                prop_assert!(best.listing_indices().windows(2).all(|w| w[0] < w[1]));
            }
        }

        #[test]
        fn prop_selection_admits_packing((vehicles, listings) in instance()) {
            if let Some(best) = cheapest_assignment(&vehicles, &listings) {
                let capacities: Vec<u32> = best
                    .listing_indices()
                    .iter()
                    .map(|&i| listings[i].capacity())
                    .collect();
                prop_assert!(can_pack(&vehicles, &capacities));
            }
        }

        #[test]
        fn prop_vehicle_order_irrelevant((vehicles, listings) in instance()) {
            let mut reversed = vehicles.clone();
            reversed.reverse();
            prop_assert_eq!(
                cheapest_assignment(&vehicles, &listings),
                cheapest_assignment(&reversed, &listings)
            );
        }

        #[test]
        fn prop_adding_vehicle_never_cheaper(
            (vehicles, listings) in instance(),
            extra in 1u32..30,
        ) {
            let mut more = vehicles.clone();
            more.push(Vehicle::new(extra));
            let before = cheapest_assignment(&vehicles, &listings);
            let after = cheapest_assignment(&more, &listings);
            if let Some(after) = after {
                let before = before.expect("a superset request was feasible");
                prop_assert!(after.total_price_in_cents() >= before.total_price_in_cents());
            }
        }
    }
}
