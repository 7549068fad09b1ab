//! C-ABI wrapper around `repo-search-core`.
//!
//! # Overview
//! Exposes repository search through `extern "C"` functions so a mobile host
//! can build the request, run it on its own HTTP stack, and hand the response
//! back for status dispatch and decoding without linking to Rust's async
//! runtime or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Connectivity, the loader, and notices stay on the host side. The result
//!   envelope carries the flags the host needs to drive them.
//! - The C caller owns all returned pointers and must call the matching
//!   `repo_search_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use repo_search_core::{canonical_reason, format_timestamp, HttpResponse};

use types::*;

/// Borrow a C string as `&str`. `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives the
/// returned slice.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Copy a C string, replacing invalid UTF-8 sequences. Null reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn c_text(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `SearchClient` bound to `base_url`.
///
/// `token` may be null or empty for unauthenticated search. Returns null if
/// `base_url` is null, if either string is not valid UTF-8, or if an internal
/// panic occurs. The caller must free the returned pointer with
/// `repo_search_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_client_new(
    base_url: *const c_char,
    token: *const c_char,
) -> *mut FfiSearchClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { c_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let token = if token.is_null() {
            None
        } else {
            match unsafe { c_str(token) } {
                Some(token) => Some(token),
                None => return std::ptr::null_mut(),
            }
        };
        let client = repo_search_core::SearchClient::new(url, token);
        Box::into_raw(Box::new(FfiSearchClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `SearchClient` created by `repo_search_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_client_free(client: *mut FfiSearchClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

/// Build the GET request for a repository search.
///
/// Returns null if `client` or `query` is null, or if `query` is not valid
/// UTF-8.
/// The caller must free the returned pointer with `repo_search_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_build_search(
    client: *const FfiSearchClient,
    query: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(query) = (unsafe { c_str(query) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_search(query))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
///
/// A null body reads as empty; invalid UTF-8 is replaced so that a bad 200
/// body fails to decode instead of looking empty. A null or empty reason
/// falls back to the canonical phrase for the status.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let mut reason = unsafe { c_text(resp.reason) };
    if reason.is_empty() {
        reason = canonical_reason(resp.status).to_string();
    }
    HttpResponse {
        status: resp.status,
        reason,
        headers: Vec::new(),
        body: unsafe { c_text(resp.body) },
    }
}

/// Dispatch a search response on its status code and decode the body.
///
/// Always returns a result envelope, never null. The caller must free it
/// with `repo_search_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_parse_search(
    client: *const FfiSearchClient,
    response: *const FfiHttpResponse,
) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiSearchResult::null_arg("client");
        }
        if response.is_null() {
            return FfiSearchResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = ffi_response_to_core(resp);
        match client.inner.parse_search(&core_resp) {
            Ok(Some(page)) => FfiSearchResult::ok(page),
            Ok(None) => FfiSearchResult::empty(),
            Err(e) => FfiSearchResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in repo_search_parse_search"))
}

/// Render an ISO-8601 UTC timestamp as `yyyy-MM-dd hh:mm a`.
///
/// Null input yields an empty string; unparseable input is returned as is.
/// The caller must free the result with `repo_search_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_format_timestamp(utc: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        let input = if utc.is_null() {
            None
        } else {
            Some(unsafe { c_text(utc) })
        };
        to_c_string(&format_timestamp(input.as_deref()))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `repo_search_build_search`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        if !req.headers.is_null() && req.headers_len > 0 {
            let len = req.headers_len as usize;
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.headers, len))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiSearchResult` returned by `repo_search_parse_search`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_free_result(result: *mut FfiSearchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if !result.items.is_null() && result.items_len > 0 {
            let len = result.items_len as usize;
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(result.items, len))
            };
            for item in items.iter() {
                free_search_item_fields(item);
            }
        }
    });
}

/// Free the C-string fields of an `FfiSearchItem` (but not the struct itself).
fn free_search_item_fields(item: &FfiSearchItem) {
    for s in [
        item.full_name,
        item.name,
        item.description,
        item.avatar_url,
        item.created_at,
        item.updated_at,
    ] {
        free_c_string(s);
    }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn repo_search_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
