//! Listing catalog: loading, eligibility filtering, grouping by location.
//!
//! - [`Catalog`] — immutable, location-grouped, price-sorted eligible listings
//! - [`loader`] — JSON listing records and their validation

mod grouping;
pub mod loader;

pub use grouping::Catalog;
pub use loader::{CatalogError, RawListing};
