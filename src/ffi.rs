//! C-compatible bindings.
//!
//! The service lives behind an opaque pointer. Every pointer returned by
//! this module must be released with the matching `_free` function:
//!
//! * `u_storage_service_new` / `u_storage_service_free`
//! * `u_storage_service_search` result / `u_storage_string_free`
//!
//! Passing a null service or request pointer aborts the process.

use std::ffi::{CStr, CString};
use std::ptr;

use libc::c_char;
use tracing::error;

use crate::config::StorageConfig;
use crate::service::SearchService;

/// Loads a listings file and creates a service.
///
/// Returns null if the path is not valid UTF-8 or the catalog cannot be
/// loaded; the cause is logged.
///
/// # Safety
///
/// `listings_path` must be a valid, NUL-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn u_storage_service_new(listings_path: *const c_char) -> *mut SearchService {
    assert!(!listings_path.is_null(), "listings_path must not be null");
    let Ok(path) = CStr::from_ptr(listings_path).to_str() else {
        error!("listings path is not valid UTF-8");
        return ptr::null_mut();
    };
    match SearchService::from_config(&StorageConfig::new(path)) {
        Ok(service) => Box::into_raw(Box::new(service)),
        Err(err) => {
            error!(error = %err, "failed to load catalog");
            ptr::null_mut()
        }
    }
}

/// Frees a service created by `u_storage_service_new`. Null is a no-op.
///
/// # Safety
///
/// `ptr` must come from `u_storage_service_new` and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn u_storage_service_free(ptr: *mut SearchService) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Handles a JSON request body.
///
/// Writes the status code (200, 400 or 500) to `status_out` when it is
/// non-null and returns the JSON response body as an owned C string.
///
/// # Safety
///
/// `service` must be a live pointer from `u_storage_service_new`,
/// `request_json` a valid NUL-terminated C string and `status_out` either
/// null or valid for a write.
#[no_mangle]
pub unsafe extern "C" fn u_storage_service_search(
    service: *const SearchService,
    request_json: *const c_char,
    status_out: *mut u16,
) -> *mut c_char {
    assert!(!service.is_null(), "service must not be null");
    assert!(!request_json.is_null(), "request_json must not be null");

    let service = &*service;
    let request = CStr::from_ptr(request_json).to_string_lossy();
    let (status, body) = service.respond(&request);

    if !status_out.is_null() {
        *status_out = status;
    }
    // serde_json escapes control characters, so the body has no interior NUL.
    match CString::new(body) {
        Ok(body) => body.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Frees a string returned by `u_storage_service_search`. Null is a no-op.
///
/// # Safety
///
/// `ptr` must come from this module and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn u_storage_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
