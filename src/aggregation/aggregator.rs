//! Per-location search and ranking.

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{AssignmentOutcome, Vehicle};
use crate::search::{AssignmentSearch, SearchStatistics};

/// Outcomes of one aggregation run, with bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Feasible outcomes sorted by ascending total price.
    pub outcomes: Vec<AssignmentOutcome>,
    /// Number of locations the search was run for.
    pub searches_run: usize,
    /// Locations skipped because no feasible assignment exists.
    pub infeasible_locations: Vec<String>,
    /// Statistics summed over all searches.
    pub statistics: SearchStatistics,
}

/// Runs the cheapest-assignment search for every location of a catalog.
///
/// # Examples
///
/// ```
/// use u_storage::aggregation::Aggregator;
/// use u_storage::catalog::Catalog;
/// use u_storage::models::{Listing, Vehicle};
///
/// let catalog = Catalog::new(vec![
///     Listing::new("A", "L1", 20, 10, 500),
///     Listing::new("B", "L2", 20, 10, 300),
///     Listing::new("C", "L3", 5, 10, 100),
/// ])
/// .unwrap();
///
/// let aggregation = Aggregator::new(&catalog).run(&[Vehicle::new(15)]);
/// assert_eq!(aggregation.searches_run, 3);
/// assert_eq!(aggregation.infeasible_locations, vec!["L3".to_string()]);
/// let locations: Vec<&str> = aggregation
///     .outcomes
///     .iter()
///     .map(|o| o.location_id.as_str())
///     .collect();
/// assert_eq!(locations, vec!["L2", "L1"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator over the given catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Searches every location and ranks the feasible outcomes.
    ///
    /// An empty vehicle multiset yields an empty result without running any
    /// search. Locations tying on price keep catalog order (lexical by id).
    pub fn run(&self, vehicles: &[Vehicle]) -> Aggregation {
        let mut aggregation = Aggregation::default();
        if vehicles.is_empty() {
            return aggregation;
        }

        for (location_id, listings) in self.catalog.locations() {
            let result = AssignmentSearch::new(vehicles, listings).run();
            aggregation.searches_run += 1;
            aggregation.statistics.merge(&result.statistics);

            match result.best {
                Some(best) => {
                    debug!(
                        location_id,
                        total_price_in_cents = best.total_price_in_cents(),
                        listings = best.listing_ids().len(),
                        "location feasible"
                    );
                    let (total, listing_ids) = best.into_parts();
                    aggregation
                        .outcomes
                        .push(AssignmentOutcome::new(location_id, listing_ids, total));
                }
                None => {
                    debug!(location_id, "location infeasible");
                    aggregation.infeasible_locations.push(location_id.to_string());
                }
            }
        }

        aggregation
            .outcomes
            .sort_by_key(|o| o.total_price_in_cents);
        aggregation
    }
}

/// Returns the feasible outcomes for every location, cheapest first.
///
/// # Examples
///
/// ```
/// use u_storage::aggregation::aggregate;
/// use u_storage::catalog::Catalog;
/// use u_storage::models::{Listing, Vehicle};
///
/// let catalog = Catalog::new(vec![Listing::new("A", "L1", 20, 10, 500)]).unwrap();
/// let outcomes = aggregate(&catalog, &[Vehicle::new(15)]);
/// assert_eq!(outcomes.len(), 1);
/// assert_eq!(outcomes[0].total_price_in_cents, 500);
/// assert!(aggregate(&catalog, &[]).is_empty());
/// ```
pub fn aggregate(catalog: &Catalog, vehicles: &[Vehicle]) -> Vec<AssignmentOutcome> {
    Aggregator::new(catalog).run(vehicles).outcomes
}
