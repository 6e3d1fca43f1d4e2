//! Location-grouped, price-sorted listing catalog.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use super::loader::{listings_from_reader, listings_from_str, CatalogError};
use crate::config::StorageConfig;
use crate::models::Listing;

/// Immutable catalog of eligible listings grouped by location.
///
/// Built once from raw listings: ineligible listings (width below
/// [`MIN_ELIGIBLE_WIDTH`](crate::config::MIN_ELIGIBLE_WIDTH)) are dropped,
/// the rest are grouped by location and stable-sorted by ascending price.
/// Locations iterate in lexical order of their id. A location whose
/// listings were all dropped is kept with an empty sequence.
///
/// The catalog is never mutated after construction, so a shared reference
/// can be read from any number of threads.
///
/// # Examples
///
/// ```
/// use u_storage::catalog::Catalog;
/// use u_storage::models::Listing;
///
/// let catalog = Catalog::new(vec![
///     Listing::new("A", "L1", 20, 10, 500),
///     Listing::new("B", "L1", 20, 10, 300),
///     Listing::new("C", "L1", 20, 8, 100),
/// ])
/// .unwrap();
///
/// let ids: Vec<&str> = catalog.listings("L1").unwrap().iter().map(|l| l.id()).collect();
/// assert_eq!(ids, vec!["B", "A"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_location: BTreeMap<String, Vec<Listing>>,
}

impl Catalog {
    /// Builds a catalog from listings.
    ///
    /// Returns [`CatalogError::DuplicateListingId`] if two listings share
    /// an id, eligible or not.
    pub fn new(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let total = listings.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(total);
        let mut by_location: BTreeMap<String, Vec<Listing>> = BTreeMap::new();

        for listing in listings {
            if !seen.insert(listing.id().to_string()) {
                return Err(CatalogError::DuplicateListingId {
                    id: listing.id().to_string(),
                });
            }
            let group = by_location
                .entry(listing.location_id().to_string())
                .or_default();
            if listing.is_eligible() {
                group.push(listing);
            } else {
                debug!(
                    listing_id = listing.id(),
                    width = listing.width(),
                    "dropping ineligible listing"
                );
            }
        }

        for group in by_location.values_mut() {
            group.sort_by_key(|l| l.price_in_cents());
        }

        let catalog = Self { by_location };
        info!(
            records = total,
            eligible = catalog.num_listings(),
            locations = catalog.num_locations(),
            "catalog built"
        );
        Ok(catalog)
    }

    /// Builds a catalog from a JSON array of listing records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::new(listings_from_str(json)?)
    }

    /// Builds a catalog from a reader yielding a JSON array of records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(listings_from_reader(reader)?)
    }

    /// Loads a catalog from a JSON listings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loading listings");
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a catalog from the configured listings file.
    pub fn from_config(config: &StorageConfig) -> Result<Self, CatalogError> {
        Self::from_path(config.listings_path())
    }

    /// Eligible listings at a location, sorted by ascending price.
    ///
    /// Returns `None` for a location that never appeared in the source.
    pub fn listings(&self, location_id: &str) -> Option<&[Listing]> {
        self.by_location.get(location_id).map(Vec::as_slice)
    }

    /// Iterates locations in lexical order with their listings.
    pub fn locations(&self) -> impl Iterator<Item = (&str, &[Listing])> {
        self.by_location
            .iter()
            .map(|(id, listings)| (id.as_str(), listings.as_slice()))
    }

    /// Looks up an eligible listing by location and id.
    pub fn find_listing(&self, location_id: &str, listing_id: &str) -> Option<&Listing> {
        self.listings(location_id)?
            .iter()
            .find(|l| l.id() == listing_id)
    }

    /// Number of locations, including those without eligible listings.
    pub fn num_locations(&self) -> usize {
        self.by_location.len()
    }

    /// Number of eligible listings across all locations.
    pub fn num_listings(&self) -> usize {
        self.by_location.values().map(Vec::len).sum()
    }

    /// Returns `true` if the catalog has no eligible listings.
    pub fn is_empty(&self) -> bool {
        self.num_listings() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id()).collect()
    }

    #[test]
    fn test_groups_and_sorts_by_price() {
        let catalog = Catalog::new(vec![
            Listing::new("A", "L2", 10, 10, 300),
            Listing::new("B", "L1", 10, 10, 200),
            Listing::new("C", "L2", 10, 10, 100),
            Listing::new("D", "L1", 10, 10, 50),
        ])
        .expect("valid");
        assert_eq!(catalog.num_locations(), 2);
        assert_eq!(ids(catalog.listings("L1").expect("L1")), vec!["D", "B"]);
        assert_eq!(ids(catalog.listings("L2").expect("L2")), vec!["C", "A"]);
    }

    #[test]
    fn test_sort_is_stable_on_price_ties() {
        let catalog = Catalog::new(vec![
            Listing::new("X", "L1", 10, 10, 100),
            Listing::new("Y", "L1", 20, 10, 100),
            Listing::new("Z", "L1", 5, 10, 50),
            Listing::new("W", "L1", 30, 10, 100),
        ])
        .expect("valid");
        assert_eq!(
            ids(catalog.listings("L1").expect("L1")),
            vec!["Z", "X", "Y", "W"]
        );
    }

    #[test]
    fn test_drops_ineligible() {
        let catalog = Catalog::new(vec![
            Listing::new("A", "L1", 10, 9, 100),
            Listing::new("B", "L1", 10, 10, 100),
            Listing::new("C", "L2", 40, 3, 1),
        ])
        .expect("valid");
        assert_eq!(ids(catalog.listings("L1").expect("L1")), vec!["B"]);
        assert_eq!(catalog.listings("L2").map(|l| l.len()), Some(0));
        assert_eq!(catalog.num_listings(), 1);
        assert!(catalog.find_listing("L1", "A").is_none());
        assert!(catalog.find_listing("L2", "C").is_none());
    }

    #[test]
    fn test_locations_lexical_order() {
        let catalog = Catalog::new(vec![
            Listing::new("A", "loc-c", 10, 10, 1),
            Listing::new("B", "loc-a", 10, 10, 1),
            Listing::new("C", "loc-b", 10, 10, 1),
        ])
        .expect("valid");
        let order: Vec<&str> = catalog.locations().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["loc-a", "loc-b", "loc-c"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::new(vec![
            Listing::new("A", "L1", 10, 10, 1),
            Listing::new("A", "L2", 10, 10, 1),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateListingId { ref id } if id == "A"));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(vec![]).expect("valid");
        assert!(catalog.is_empty());
        assert_eq!(catalog.num_locations(), 0);
        assert!(catalog.listings("L1").is_none());
    }

    #[test]
    fn test_from_json_str() {
        let catalog = Catalog::from_json_str(
            r#"[{"id": "A", "location_id": "L1", "length": 20, "width": 10, "price_in_cents": 500}]"#,
        )
        .expect("valid");
        let listing = catalog.find_listing("L1", "A").expect("present");
        assert_eq!(listing.capacity(), 20);
    }

    #[test]
    fn test_from_path_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "u-storage-catalog-{}-{}.json",
            std::process::id(),
            line!()
        ));
        std::fs::write(
            &path,
            r#"[{"id": "A", "location_id": "L1", "length": 20, "width": 10, "price_in_cents": 500},
                {"id": "B", "location_id": "L1", "length": 20, "width": 2, "price_in_cents": 10}]"#,
        )
        .expect("write temp file");
        let catalog = Catalog::from_config(&StorageConfig::new(&path));
        let _ = std::fs::remove_file(&path);
        let catalog = catalog.expect("valid");
        assert_eq!(catalog.num_listings(), 1);
    }

    #[test]
    fn test_from_path_missing_file() {
        let path = std::env::temp_dir().join("u-storage-does-not-exist.json");
        let err = Catalog::from_path(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
