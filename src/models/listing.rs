//! Listing type: a rentable storage unit at a location.

use serde::{Deserialize, Serialize};

use crate::config::MIN_ELIGIBLE_WIDTH;

/// A rentable storage unit with a length capacity and a one-time price.
///
/// The price is charged once if any vehicle is placed in the listing,
/// regardless of how much of its capacity is consumed.
///
/// # Examples
///
/// ```
/// use u_storage::models::Listing;
///
/// let l = Listing::new("A", "L1", 20, 10, 500);
/// assert_eq!(l.id(), "A");
/// assert_eq!(l.capacity(), 20);
/// assert!(l.is_eligible());
///
/// let narrow = Listing::new("B", "L1", 20, 9, 100);
/// assert!(!narrow.is_eligible());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    id: String,
    location_id: String,
    length: u32,
    width: i64,
    price_in_cents: u64,
}

impl Listing {
    /// Creates a new listing.
    pub fn new(
        id: impl Into<String>,
        location_id: impl Into<String>,
        length: u32,
        width: i64,
        price_in_cents: u64,
    ) -> Self {
        Self {
            id: id.into(),
            location_id: location_id.into(),
            length,
            width,
            price_in_cents,
        }
    }

    /// Listing identifier, unique within a catalog.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Location this listing belongs to.
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// Listing length.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Maximum summed vehicle length this listing can hold (its length).
    pub fn capacity(&self) -> u32 {
        self.length
    }

    /// Listing width. Only used for the eligibility gate.
    pub fn width(&self) -> i64 {
        self.width
    }

    /// One-time price charged when the listing is used.
    pub fn price_in_cents(&self) -> u64 {
        self.price_in_cents
    }

    /// Returns `true` if the listing is wide enough to hold any vehicle.
    pub fn is_eligible(&self) -> bool {
        self.width >= MIN_ELIGIBLE_WIDTH
    }
}
