//! Outcome verification.
//!
//! Independent of the search: recomputes prices from the catalog and checks
//! that the vehicles can actually be packed into the reported listings.

mod checker;
mod packing;

pub use checker::{AssignmentChecker, Violation, ViolationType};
pub use packing::can_pack;
