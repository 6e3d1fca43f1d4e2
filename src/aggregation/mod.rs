//! Result aggregation across catalog locations.
//!
//! Runs the assignment search once per location, drops infeasible
//! locations and stable-sorts the rest by ascending total price.

mod aggregator;

pub use aggregator::{aggregate, Aggregation, Aggregator};
