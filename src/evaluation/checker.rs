//! Outcome checker that re-derives pricing and feasibility from the catalog.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::models::{total_length, AssignmentOutcome, Listing, Vehicle};

use super::packing::can_pack;

/// A type of inconsistency between an outcome and the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// The outcome names a location the catalog does not have.
    UnknownLocation {
        /// Location id reported by the outcome.
        location_id: String,
    },
    /// A listing id is not an eligible listing at the outcome's location.
    UnknownListing {
        /// Offending listing id.
        listing_id: String,
    },
    /// A listing id appears more than once.
    DuplicateListing {
        /// Repeated listing id.
        listing_id: String,
    },
    /// Listing ids are not in ascending catalog order.
    OutOfOrder,
    /// The reported total differs from the sum of the listings' prices.
    PriceMismatch {
        /// Sum of the prices of the distinct listings.
        expected: u64,
        /// Total reported by the outcome.
        reported: u64,
    },
    /// The vehicles cannot be packed into the listed listings.
    NoFeasiblePacking {
        /// Summed vehicle length.
        vehicles_length: u64,
        /// Summed capacity of the listed listings.
        capacity: u64,
    },
}

/// An inconsistency found in an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Verifies outcomes against a catalog and the vehicles that produced them.
///
/// # Examples
///
/// ```
/// use u_storage::catalog::Catalog;
/// use u_storage::evaluation::AssignmentChecker;
/// use u_storage::models::{AssignmentOutcome, Listing, Vehicle};
///
/// let catalog = Catalog::new(vec![Listing::new("A", "L1", 20, 10, 500)]).unwrap();
/// let vehicles = vec![Vehicle::new(15)];
/// let checker = AssignmentChecker::new(&catalog, &vehicles);
///
/// let outcome = AssignmentOutcome::new("L1", vec!["A".into()], 500);
/// assert!(checker.check(&outcome).is_empty());
/// ```
pub struct AssignmentChecker<'a> {
    catalog: &'a Catalog,
    vehicles: &'a [Vehicle],
}

impl<'a> AssignmentChecker<'a> {
    /// Creates a checker for the given catalog and request vehicles.
    pub fn new(catalog: &'a Catalog, vehicles: &'a [Vehicle]) -> Self {
        Self { catalog, vehicles }
    }

    /// Checks one outcome, returning every violation found.
    ///
    /// An empty list means the outcome is priced correctly, uses only
    /// eligible listings of its location in catalog order, and admits a
    /// feasible packing of the vehicles.
    pub fn check(&self, outcome: &AssignmentOutcome) -> Vec<Violation> {
        let mut violations = Vec::new();

        let Some(listings) = self.catalog.listings(&outcome.location_id) else {
            violations.push(Violation::new(ViolationType::UnknownLocation {
                location_id: outcome.location_id.clone(),
            }));
            return violations;
        };

        let mut seen = HashSet::new();
        let mut used: Vec<(usize, &Listing)> = Vec::with_capacity(outcome.listing_ids.len());
        for id in &outcome.listing_ids {
            if !seen.insert(id.as_str()) {
                violations.push(Violation::new(ViolationType::DuplicateListing {
                    listing_id: id.clone(),
                }));
                continue;
            }
            match listings.iter().position(|l| l.id() == id) {
                Some(idx) => used.push((idx, &listings[idx])),
                None => violations.push(Violation::new(ViolationType::UnknownListing {
                    listing_id: id.clone(),
                })),
            }
        }

        if used.windows(2).any(|w| w[0].0 > w[1].0) {
            violations.push(Violation::new(ViolationType::OutOfOrder));
        }

        let expected: u64 = used.iter().map(|(_, l)| l.price_in_cents()).sum();
        if expected != outcome.total_price_in_cents {
            violations.push(Violation::new(ViolationType::PriceMismatch {
                expected,
                reported: outcome.total_price_in_cents,
            }));
        }

        let capacities: Vec<u32> = used.iter().map(|(_, l)| l.capacity()).collect();
        if !can_pack(self.vehicles, &capacities) {
            violations.push(Violation::new(ViolationType::NoFeasiblePacking {
                vehicles_length: total_length(self.vehicles),
                capacity: capacities.iter().map(|&c| u64::from(c)).sum(),
            }));
        }

        violations
    }

    /// Checks a sequence of outcomes, returning `(outcome index, violation)`
    /// pairs.
    pub fn check_all(&self, outcomes: &[AssignmentOutcome]) -> Vec<(usize, Violation)> {
        outcomes
            .iter()
            .enumerate()
            .flat_map(|(idx, outcome)| self.check(outcome).into_iter().map(move |v| (idx, v)))
            .collect()
    }
}
