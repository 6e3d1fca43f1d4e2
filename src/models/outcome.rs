//! Per-location assignment outcome.

use serde::{Deserialize, Serialize};

/// The cheapest feasible assignment found for one location.
///
/// Serializes as `{"location_id", "listing_ids", "total_price_in_cents"}`,
/// in that field order.
///
/// # Examples
///
/// ```
/// use u_storage::models::AssignmentOutcome;
///
/// let o = AssignmentOutcome::new("L1", vec!["A".into()], 500);
/// let json = serde_json::to_string(&o).unwrap();
/// assert_eq!(
///     json,
///     r#"{"location_id":"L1","listing_ids":["A"],"total_price_in_cents":500}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// Location the listings belong to.
    pub location_id: String,
    /// Distinct listings used, in ascending catalog price order.
    pub listing_ids: Vec<String>,
    /// Sum of the prices of the listings in `listing_ids`.
    pub total_price_in_cents: u64,
}

impl AssignmentOutcome {
    /// Creates a new outcome.
    pub fn new(
        location_id: impl Into<String>,
        listing_ids: Vec<String>,
        total_price_in_cents: u64,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            listing_ids,
            total_price_in_cents,
        }
    }

    /// Number of listings used.
    pub fn num_listings(&self) -> usize {
        self.listing_ids.len()
    }
}
