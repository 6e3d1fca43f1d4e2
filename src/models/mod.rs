//! Domain model types for vehicle storage search.
//!
//! Provides the core value objects: vehicles characterized by length,
//! listings with a capacity, a width gate and a one-time price, and the
//! per-location outcome returned to callers.

mod listing;
mod outcome;
mod vehicle;

pub use listing::Listing;
pub use outcome::AssignmentOutcome;
pub use vehicle::{total_length, Vehicle};
