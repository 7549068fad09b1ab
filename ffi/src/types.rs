//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations: owned
//! `*mut c_char` instead of `String`, pointer plus length instead of `Vec`,
//! and enums with explicit discriminants. Item fields arrive with their
//! display defaults already applied, so hosts never see a null name or
//! description. Conversions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use repo_search_core::{ApiError, HttpRequest, SearchItem, SearchResponse};

/// Opaque handle to a `SearchClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiSearchClient {
    pub(crate) inner: repo_search_core::SearchClient,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs are dropped.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request described as C-compatible plain data.
///
/// Built by `repo_search_build_search`. The host executes it and passes the
/// response back through `repo_search_parse_search`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Null if the header count does not fit `headers_len`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let Ok(headers_len) = u32::try_from(req.headers.len()) else {
            return std::ptr::null_mut();
        };
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            url: to_c_string(&req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host builds this after executing the request. `reason` and `body` may
/// be null; the FFI layer reads but never frees them.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub reason: *const c_char,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome category of `repo_search_parse_search`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// 200 with an empty or `null` body; nothing to show, nothing to report.
    Empty = 1,
    Informational = 2,
    Redirect = 3,
    Unauthorized = 4,
    NotFound = 5,
    Server = 6,
    ClientMessage = 7,
    ClientErrorText = 8,
    Unrecognized = 9,
    Deserialization = 10,
    Transport = 11,
    Offline = 12,
    Panic = 13,
    NullArg = 14,
}

/// A single search result exposed to C. Every string is non-null.
/// `avatar_url` is an empty string when the owner has none.
#[repr(C)]
pub struct FfiSearchItem {
    pub full_name: *mut c_char,
    pub name: *mut c_char,
    pub description: *mut c_char,
    pub avatar_url: *mut c_char,
    pub created_at: *mut c_char,
    pub updated_at: *mut c_char,
    pub stars: u64,
    pub watchers: u64,
    pub score: f64,
}

impl FfiSearchItem {
    fn from_core(item: &SearchItem) -> Self {
        FfiSearchItem {
            full_name: to_c_string(item.full_name()),
            name: to_c_string(item.name()),
            description: to_c_string(item.description()),
            avatar_url: to_c_string(item.avatar_url().unwrap_or("")),
            created_at: to_c_string(&item.created()),
            updated_at: to_c_string(&item.updated()),
            stars: item.stars(),
            watchers: item.watchers(),
            score: item.score(),
        }
    }
}

/// Result envelope for `repo_search_parse_search`.
///
/// On `Ok`, `items` points to the decoded results (possibly zero of them)
/// and `has_items` is false when the response carried no `items` array, in
/// which case the host keeps its current list. On failure, `error_message`
/// holds the text to surface: the server message when `forward_to_caller`
/// is set, a diagnostic otherwise. `show_generic_notice` asks the host to
/// show its generic error text as well.
#[repr(C)]
pub struct FfiSearchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub forward_to_caller: bool,
    pub show_generic_notice: bool,
    pub total_count: u64,
    pub has_items: bool,
    pub items: *mut FfiSearchItem,
    pub items_len: u32,
}

impl FfiSearchResult {
    fn blank(error_code: FfiErrorCode) -> Self {
        FfiSearchResult {
            error_code,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            forward_to_caller: false,
            show_generic_notice: false,
            total_count: 0,
            has_items: false,
            items: std::ptr::null_mut(),
            items_len: 0,
        }
    }

    pub(crate) fn ok(response: SearchResponse) -> *mut Self {
        let mut result = Self::blank(FfiErrorCode::Ok);
        result.http_status = 200;
        result.total_count = response.total_count.unwrap_or(0);
        if let Some(items) = response.items {
            let Ok(items_len) = u32::try_from(items.len()) else {
                return Self::from_error(ApiError::Deserialization(format!(
                    "{} items exceed the C result limit",
                    items.len()
                )));
            };
            result.has_items = true;
            result.items_len = items_len;
            if !items.is_empty() {
                let ffi_items: Vec<FfiSearchItem> =
                    items.iter().map(FfiSearchItem::from_core).collect();
                result.items = Box::into_raw(ffi_items.into_boxed_slice()) as *mut FfiSearchItem;
            }
        }
        Box::into_raw(Box::new(result))
    }

    pub(crate) fn empty() -> *mut Self {
        let mut result = Self::blank(FfiErrorCode::Empty);
        result.http_status = 200;
        Box::into_raw(Box::new(result))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let mut result = Self::blank(error_code(&err));
        result.http_status = err.status().unwrap_or(0);
        result.show_generic_notice = err.shows_generic_notice();
        let message = match err.failure() {
            Some((message, _)) => {
                result.forward_to_caller = true;
                message.to_string()
            }
            None => err.to_string(),
        };
        result.error_message = to_c_string(&message);
        Box::into_raw(Box::new(result))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let mut result = Self::blank(FfiErrorCode::NullArg);
        result.error_message = to_c_string(&format!("null argument: {name}"));
        Box::into_raw(Box::new(result))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        let mut result = Self::blank(FfiErrorCode::Panic);
        result.error_message = to_c_string(msg);
        Box::into_raw(Box::new(result))
    }
}

fn error_code(err: &ApiError) -> FfiErrorCode {
    match err {
        ApiError::Offline => FfiErrorCode::Offline,
        ApiError::Informational { .. } => FfiErrorCode::Informational,
        ApiError::Redirect { .. } => FfiErrorCode::Redirect,
        ApiError::Unauthorized { .. } => FfiErrorCode::Unauthorized,
        ApiError::NotFound { .. } => FfiErrorCode::NotFound,
        ApiError::Server { .. } => FfiErrorCode::Server,
        ApiError::ClientMessage { .. } => FfiErrorCode::ClientMessage,
        ApiError::ClientErrorText { .. } => FfiErrorCode::ClientErrorText,
        ApiError::Unrecognized { .. } => FfiErrorCode::Unrecognized,
        ApiError::Transport(_) => FfiErrorCode::Transport,
        ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
    }
}
