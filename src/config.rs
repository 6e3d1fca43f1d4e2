//! Configuration and fixed limits.

use std::path::{Path, PathBuf};

/// Minimum listing width for a listing to be eligible at all.
pub const MIN_ELIGIBLE_WIDTH: i64 = 10;

/// Maximum total vehicle quantity accepted in one request.
pub const MAX_TOTAL_QUANTITY: u64 = 5;

/// Environment variable naming the listings file.
pub const LISTINGS_FILE_ENV: &str = "LISTINGS_FILE";

/// Listings file used when `LISTINGS_FILE` is unset.
pub const DEFAULT_LISTINGS_FILE: &str = "listings.json";

/// Where the catalog is loaded from.
///
/// # Examples
///
/// ```
/// use u_storage::config::StorageConfig;
///
/// let cfg = StorageConfig::default().with_listings_path("/data/listings.json");
/// assert_eq!(cfg.listings_path().to_str(), Some("/data/listings.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    listings_path: PathBuf,
}

impl StorageConfig {
    /// Creates a configuration pointing at the given listings file.
    pub fn new(listings_path: impl Into<PathBuf>) -> Self {
        Self {
            listings_path: listings_path.into(),
        }
    }

    /// Reads `LISTINGS_FILE`, falling back to [`DEFAULT_LISTINGS_FILE`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LISTINGS_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }

    /// Sets the listings file path.
    pub fn with_listings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.listings_path = path.into();
        self
    }

    /// Path of the listings file.
    pub fn listings_path(&self) -> &Path {
        &self.listings_path
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LISTINGS_FILE)
    }
}
