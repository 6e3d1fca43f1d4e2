//! Request handling on top of a loaded catalog.
//!
//! [`SearchService`] owns the catalog and maps a raw JSON request body to
//! either the ranked outcomes or a classified [`ServiceError`]. Transport
//! layers only need [`SearchService::respond`], which yields a status code
//! and a JSON body.

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::aggregation::aggregate;
use crate::catalog::{Catalog, CatalogError};
use crate::config::StorageConfig;
use crate::models::{AssignmentOutcome, Vehicle};
use crate::request::{validate_request, RequestError};

/// Errors surfaced to a caller of the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The body is not valid JSON.
    #[error("Invalid or missing JSON body")]
    InvalidJson(#[source] serde_json::Error),

    /// The body is JSON but not a valid vehicle request.
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// An unexpected failure while producing the response.
    #[error("Server error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns `true` if the caller sent a bad request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// HTTP-style status code: 400 for client errors, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// JSON error body: `{"error": ...}`, plus `"detail"` for internal errors.
    pub fn to_body(&self) -> Value {
        match self {
            Self::Internal(detail) => json!({"error": "Server error", "detail": detail}),
            other => json!({"error": other.to_string()}),
        }
    }
}

/// Answers vehicle storage requests against an owned catalog.
///
/// # Examples
///
/// ```
/// use u_storage::catalog::Catalog;
/// use u_storage::models::Listing;
/// use u_storage::service::SearchService;
///
/// let catalog = Catalog::new(vec![Listing::new("A", "L1", 20, 10, 500)]).unwrap();
/// let service = SearchService::new(catalog);
///
/// let (status, body) = service.respond(r#"[{"length": 15, "quantity": 1}]"#);
/// assert_eq!(status, 200);
/// assert_eq!(
///     body,
///     r#"[{"location_id":"L1","listing_ids":["A"],"total_price_in_cents":500}]"#
/// );
///
/// let (status, _) = service.respond(r#"[{"length": 15}]"#);
/// assert_eq!(status, 400);
/// ```
#[derive(Debug, Clone)]
pub struct SearchService {
    catalog: Catalog,
}

impl SearchService {
    /// Creates a service over an already built catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Loads the catalog named by the configuration.
    ///
    /// Fails if the listings file is unreadable or malformed; no service
    /// is created from a partial catalog.
    pub fn from_config(config: &StorageConfig) -> Result<Self, CatalogError> {
        Catalog::from_config(config).map(Self::new)
    }

    /// The catalog this service answers from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ranked outcomes for an already validated vehicle multiset.
    pub fn search(&self, vehicles: &[Vehicle]) -> Vec<AssignmentOutcome> {
        aggregate(&self.catalog, vehicles)
    }

    /// Validates a parsed payload and searches.
    pub fn handle_value(&self, payload: &Value) -> Result<Vec<AssignmentOutcome>, ServiceError> {
        let vehicles = validate_request(payload)?;
        Ok(self.search(&vehicles))
    }

    /// Parses, validates and searches a raw body, returning the JSON response.
    pub fn handle_json(&self, body: &str) -> Result<String, ServiceError> {
        let payload: Value = serde_json::from_str(body).map_err(ServiceError::InvalidJson)?;
        let outcomes = self.handle_value(&payload)?;
        serde_json::to_string(&outcomes).map_err(|e| ServiceError::Internal(e.to_string()))
    }

    /// Handles a raw body, returning `(status code, JSON body)`.
    pub fn respond(&self, body: &str) -> (u16, String) {
        match self.handle_json(body) {
            Ok(response) => (200, response),
            Err(err) => {
                if err.is_client_error() {
                    warn!(error = %err, "rejected request");
                } else {
                    error!(error = %err, "request failed");
                }
                (err.status_code(), err.to_body().to_string())
            }
        }
    }
}
