//! Listing record loader.
//!
//! Turns a JSON array of listing records into validated [`Listing`] values.
//! Numeric fields are integer-convertible: JSON integers, integral floats
//! (`20.0`) and decimal strings (`"20"`) are all accepted. Anything else,
//! including a missing field, fails the whole load.

use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::Listing;

/// The error type for catalog loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The listings file could not be opened or read.
    #[error("failed to read listings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON.
    #[error("malformed listings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON root is not an array of records.
    #[error("listings JSON root must be an array of records")]
    NotAnArray,

    /// A record is missing a field or has a field of the wrong shape.
    #[error("listing record {index} is malformed: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A numeric field is not a usable integer.
    #[error("listing record {index} has invalid '{field}': {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    /// Two records share the same listing id.
    #[error("duplicate listing id '{id}'")]
    DuplicateListingId { id: String },
}

/// A numeric field as found in the source data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawInteger {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawInteger {
    /// Converts to an integer, rejecting fractional and non-numeric values.
    pub fn to_i64(&self) -> Result<i64, String> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Ok(*f as i64)
                } else {
                    Err(format!("{f} is not an integer"))
                }
            }
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("'{s}' is not an integer")),
        }
    }
}

/// One listing record as provided by the data source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    pub id: String,
    pub location_id: String,
    pub length: RawInteger,
    pub width: RawInteger,
    pub price_in_cents: RawInteger,
}

impl RawListing {
    /// Validates the record, `index` being its position in the source.
    pub fn into_listing(self, index: usize) -> Result<Listing, CatalogError> {
        let invalid = |field: &'static str, reason: String| CatalogError::InvalidField {
            index,
            field,
            reason,
        };

        let length = self.length.to_i64().map_err(|r| invalid("length", r))?;
        let length = u32::try_from(length)
            .map_err(|_| invalid("length", format!("{length} is out of range")))?;
        let width = self.width.to_i64().map_err(|r| invalid("width", r))?;
        let price = self
            .price_in_cents
            .to_i64()
            .map_err(|r| invalid("price_in_cents", r))?;
        let price = u64::try_from(price)
            .map_err(|_| invalid("price_in_cents", format!("{price} is negative")))?;

        Ok(Listing::new(self.id, self.location_id, length, width, price))
    }
}

/// Parses listing records from a JSON value.
pub fn listings_from_value(value: Value) -> Result<Vec<Listing>, CatalogError> {
    let Value::Array(records) = value else {
        return Err(CatalogError::NotAnArray);
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let raw: RawListing = serde_json::from_value(record)
                .map_err(|source| CatalogError::InvalidRecord { index, source })?;
            raw.into_listing(index)
        })
        .collect()
}

/// Parses listing records from a JSON string.
pub fn listings_from_str(json: &str) -> Result<Vec<Listing>, CatalogError> {
    listings_from_value(serde_json::from_str(json)?)
}

/// Parses listing records from a reader yielding JSON.
pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<Listing>, CatalogError> {
    listings_from_value(serde_json::from_reader(reader)?)
}
