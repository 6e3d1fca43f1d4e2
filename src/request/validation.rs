//! Validation of the inbound vehicle list.
//!
//! The request body is a JSON array of `{"length": n, "quantity": k}`
//! objects. Both values must be positive JSON integers and the quantities
//! may sum to at most [`MAX_TOTAL_QUANTITY`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::MAX_TOTAL_QUANTITY;
use crate::models::Vehicle;

/// Validation errors for a vehicle request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Root JSON must be an array of vehicle specs")]
    NotAnArray,

    #[error("Item at index {index} must be an object")]
    NotAnObject { index: usize },

    #[error("Item at index {index} missing 'length' or 'quantity'")]
    MissingField { index: usize },

    #[error("Item {index} '{field}' must be positive integer")]
    NotPositiveInteger { index: usize, field: &'static str },

    #[error("Item {index} 'length' exceeds {max}")]
    LengthOutOfRange { index: usize, max: u32 },

    #[error("Sum of all quantities must be <= {max}")]
    TooManyVehicles { max: u64 },
}

/// One entry of a vehicle request: `quantity` vehicles of `length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub length: u32,
    pub quantity: u64,
}

impl VehicleSpec {
    /// Expands the spec into individual vehicles.
    pub fn vehicles(&self) -> impl Iterator<Item = Vehicle> {
        let vehicle = Vehicle::new(self.length);
        (0..self.quantity).map(move |_| vehicle)
    }
}

fn positive_integer(
    item: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<u64, RequestError> {
    match item.get(field) {
        Some(Value::Number(n)) => n
            .as_u64()
            .filter(|&v| v > 0)
            .ok_or(RequestError::NotPositiveInteger { index, field }),
        Some(_) => Err(RequestError::NotPositiveInteger { index, field }),
        None => Err(RequestError::MissingField { index }),
    }
}

/// Parses and validates the vehicle specs of a request payload.
///
/// Items are checked in order; the quantity cap is enforced as soon as
/// the running total exceeds it.
pub fn parse_specs(payload: &Value) -> Result<Vec<VehicleSpec>, RequestError> {
    let Value::Array(items) = payload else {
        return Err(RequestError::NotAnArray);
    };

    let mut specs = Vec::with_capacity(items.len());
    let mut total_quantity: u64 = 0;
    for (index, item) in items.iter().enumerate() {
        let Value::Object(item) = item else {
            return Err(RequestError::NotAnObject { index });
        };
        if !item.contains_key("length") || !item.contains_key("quantity") {
            return Err(RequestError::MissingField { index });
        }

        let length = positive_integer(item, index, "length")?;
        let quantity = positive_integer(item, index, "quantity")?;
        let length = u32::try_from(length).map_err(|_| RequestError::LengthOutOfRange {
            index,
            max: u32::MAX,
        })?;

        total_quantity = total_quantity.saturating_add(quantity);
        if total_quantity > MAX_TOTAL_QUANTITY {
            return Err(RequestError::TooManyVehicles {
                max: MAX_TOTAL_QUANTITY,
            });
        }
        specs.push(VehicleSpec { length, quantity });
    }

    Ok(specs)
}

/// Validates a request payload and expands it into a vehicle multiset.
///
/// # Examples
///
/// ```
/// use u_storage::request::validate_request;
///
/// let payload = serde_json::json!([
///     {"length": 10, "quantity": 2},
///     {"length": 25, "quantity": 1},
/// ]);
/// let vehicles = validate_request(&payload).unwrap();
/// assert_eq!(vehicles.len(), 3);
///
/// let too_many = serde_json::json!([{"length": 10, "quantity": 6}]);
/// assert!(validate_request(&too_many).is_err());
/// ```
pub fn validate_request(payload: &Value) -> Result<Vec<Vehicle>, RequestError> {
    Ok(parse_specs(payload)?
        .iter()
        .flat_map(VehicleSpec::vehicles)
        .collect())
}
