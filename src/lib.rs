//! # u-storage
//!
//! Vehicle storage search: given a handful of vehicles and a catalog of
//! rentable listings grouped by location, find for every location the
//! cheapest set of listings that houses all vehicles. A listing's price is
//! charged once however many vehicles share it.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Vehicle, Listing, AssignmentOutcome)
//! - [`catalog`] — Eligible listings grouped by location, sorted by price
//! - [`search`] — Branch-and-bound cheapest assignment for one location
//! - [`aggregation`] — Per-location search, filtering and price ranking
//! - [`evaluation`] — Independent outcome verification
//! - [`request`] — Vehicle request validation
//! - [`service`] — JSON request handling over a loaded catalog
//! - [`config`] — Listings source and fixed limits
//!
//! ## Example
//!
//! ```
//! use u_storage::aggregation::aggregate;
//! use u_storage::catalog::Catalog;
//! use u_storage::models::Vehicle;
//!
//! let catalog = Catalog::from_json_str(r#"[
//!     {"id": "A", "location_id": "L1", "length": 10, "width": 10, "price_in_cents": 100},
//!     {"id": "B", "location_id": "L1", "length": 10, "width": 10, "price_in_cents": 100},
//!     {"id": "C", "location_id": "L2", "length": 30, "width": 12, "price_in_cents": 150}
//! ]"#).unwrap();
//!
//! let outcomes = aggregate(&catalog, &Vehicle::repeated(10, 2));
//! assert_eq!(outcomes[0].location_id, "L2");
//! assert_eq!(outcomes[0].total_price_in_cents, 150);
//! assert_eq!(outcomes[1].listing_ids, vec!["A", "B"]);
//! ```

pub mod aggregation;
pub mod catalog;
pub mod config;
pub mod evaluation;
pub mod models;
pub mod request;
pub mod search;
pub mod service;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "wasm")]
pub mod wasm;
