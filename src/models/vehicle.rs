//! Vehicle type: a unit of cargo characterized by its length.

use serde::{Deserialize, Serialize};

/// A vehicle that must be housed in exactly one listing.
///
/// Vehicles carry no identity; two vehicles of equal length are
/// interchangeable.
///
/// # Examples
///
/// ```
/// use u_storage::models::Vehicle;
///
/// let v = Vehicle::new(15);
/// assert_eq!(v.length(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    length: u32,
}

impl Vehicle {
    /// Creates a vehicle with the given length.
    pub fn new(length: u32) -> Self {
        Self { length }
    }

    /// Expands `quantity` copies of a vehicle of the given length.
    pub fn repeated(length: u32, quantity: usize) -> Vec<Self> {
        vec![Self::new(length); quantity]
    }

    /// Vehicle length.
    pub fn length(&self) -> u32 {
        self.length
    }
}

/// Sum of the lengths of all vehicles.
pub fn total_length(vehicles: &[Vehicle]) -> u64 {
    vehicles.iter().map(|v| u64::from(v.length())).sum()
}
