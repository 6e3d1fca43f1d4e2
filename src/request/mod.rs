//! Inbound request parsing.

mod validation;

pub use validation::{parse_specs, validate_request, RequestError, VehicleSpec};
