//! Client core for searching GitHub repositories.
//!
//! # Overview
//! `SearchClient` builds `HttpRequest` values and interprets `HttpResponse`
//! values without touching the network (host-does-IO pattern). Hosts that do
//! want the core to drive I/O use `ApiCaller`, which runs a request through
//! an injected `Transport` and reports progress through the `Host`
//! capabilities, and `SearchViewModel`, which keeps the latest results.
//!
//! # Design
//! - Status handling is a pure function (`status::parse_response`), so every
//!   bucket is testable from plain data.
//! - Connectivity, strings, the loader and notices are traits injected by
//!   the host; the core holds no global UI state.
//! - Every response field is optional, with defaults exposed by accessors.

pub mod caller;
pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod status;
pub mod transport;
pub mod types;
pub mod view_model;

#[cfg(test)]
pub(crate) mod testing;

pub use caller::ApiCaller;
pub use client::SearchClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use host::{
    AlwaysOnline, Connectivity, EnglishStrings, Host, LoadingSink, Notifier, StringKey,
    StringLookup, TcpProbe,
};
pub use http::{canonical_reason, HttpRequest, HttpResponse};
pub use status::{parse_response, StatusBucket};
pub use transport::{Transport, UreqTransport};
pub use types::{format_timestamp, Owner, SearchItem, SearchResponse};
pub use view_model::SearchViewModel;
