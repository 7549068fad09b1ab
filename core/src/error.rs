//! Error types for the repository search client.
//!
//! # Design
//! Each status bucket gets its own variant so hosts can react per category.
//! Two helpers encode how a host is expected to surface an error:
//! `failure()` yields the `(message, code)` pair forwarded to the caller's
//! failure handler, and `shows_generic_notice()` says whether the generic
//! "some error" notice is shown as well. Variants with no failure payload
//! are only logged or noticed, never forwarded.

use std::fmt;

/// Errors produced by the status dispatch and the API caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No network connectivity; the request was never sent.
    Offline,

    /// 1xx status.
    Informational { status: u16, message: String },

    /// 3xx status.
    Redirect { status: u16, message: String },

    /// 401.
    Unauthorized { message: String },

    /// 404.
    NotFound { message: String },

    /// 501 through 509.
    Server { status: u16, message: String },

    /// Any other status whose body carried a top-level `"message"`.
    ClientMessage { status: u16, message: String },

    /// Any other status whose body carried `"error": {"text": ...}`.
    ClientErrorText { status: u16, message: String },

    /// Any other status with no usable message in the body.
    Unrecognized { status: u16 },

    /// The request could not be executed (DNS, connect, timeout, I/O).
    Transport(String),

    /// A 200 body could not be decoded into the expected type.
    Deserialization(String),
}

impl ApiError {
    /// The `(message, code)` pair handed to the caller's failure handler,
    /// or `None` when this error does not reach the caller.
    pub fn failure(&self) -> Option<(&str, u16)> {
        match self {
            ApiError::Informational { status, message }
            | ApiError::Redirect { status, message }
            | ApiError::Server { status, message }
            | ApiError::ClientMessage { status, message }
            | ApiError::ClientErrorText { status, message } => Some((message.as_str(), *status)),
            ApiError::Unauthorized { message } => Some((message.as_str(), 401)),
            ApiError::NotFound { message } => Some((message.as_str(), 404)),
            ApiError::Offline
            | ApiError::Unrecognized { .. }
            | ApiError::Transport(_)
            | ApiError::Deserialization(_) => None,
        }
    }

    /// Whether the generic "some error" notice accompanies this error.
    pub fn shows_generic_notice(&self) -> bool {
        matches!(
            self,
            ApiError::Redirect { .. }
                | ApiError::ClientErrorText { .. }
                | ApiError::Unrecognized { .. }
        )
    }

    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unrecognized { status } => Some(*status),
            _ => self.failure().map(|(_, code)| code),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Offline => write!(f, "device is offline"),
            ApiError::Informational { status, message } => {
                write!(f, "informational response {status}: {message}")
            }
            ApiError::Redirect { status, message } => {
                write!(f, "redirect {status}: {message}")
            }
            ApiError::Unauthorized { message } => write!(f, "unauthorized: {message}"),
            ApiError::NotFound { message } => write!(f, "not found: {message}"),
            ApiError::Server { status, message } => {
                write!(f, "server error {status}: {message}")
            }
            ApiError::ClientMessage { status, message }
            | ApiError::ClientErrorText { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Unrecognized { status } => write!(f, "HTTP {status}"),
            ApiError::Transport(msg) => write!(f, "request failed: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
