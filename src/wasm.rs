//! WebAssembly bindings.

use std::fmt::Display;

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::service::SearchService;

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// A search service built from in-memory listings.
#[wasm_bindgen]
pub struct StorageSearch {
    service: SearchService,
}

#[wasm_bindgen]
impl StorageSearch {
    /// Builds the catalog from a JSON array of listing records.
    #[wasm_bindgen(constructor)]
    pub fn new(listings_json: &str) -> Result<StorageSearch, JsValue> {
        let catalog = Catalog::from_json_str(listings_json).map_err(js_error)?;
        Ok(Self {
            service: SearchService::new(catalog),
        })
    }

    /// Searches with a JSON request body, returning the JSON response.
    #[wasm_bindgen(js_name = searchJson)]
    pub fn search_json(&self, request_json: &str) -> Result<String, JsValue> {
        self.service.handle_json(request_json).map_err(js_error)
    }

    /// Searches with a JS array of `{length, quantity}` objects.
    pub fn search(&self, request: JsValue) -> Result<JsValue, JsValue> {
        let payload: Value = serde_wasm_bindgen::from_value(request).map_err(js_error)?;
        let outcomes = self.service.handle_value(&payload).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&outcomes).map_err(js_error)
    }

    /// Number of locations in the catalog.
    #[wasm_bindgen(js_name = numLocations)]
    pub fn num_locations(&self) -> usize {
        self.service.catalog().num_locations()
    }
}

#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
