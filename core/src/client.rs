//! Stateless request builder and response parser for the search API.
//!
//! # Design
//! `SearchClient` holds only the base URL and an optional token. It builds
//! `HttpRequest` values and interprets `HttpResponse` values; executing the
//! round-trip is left to a `Transport` or to the FFI host.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::status::parse_response;
use crate::types::SearchResponse;

pub const SEARCH_PATH: &str = "/search/repositories";
pub const USER_AGENT: &str = "repo-search";
const ACCEPT: &str = "application/vnd.github+json";

#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    token: Option<String>,
}

impl SearchClient {
    /// `token` is sent as a bearer credential; blank tokens are ignored.
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, config.token.as_deref())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_search(&self, query: &str) -> HttpRequest {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let mut headers = vec![
            ("accept".to_string(), ACCEPT.to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            url: format!("{}{SEARCH_PATH}?q={encoded}", self.base_url),
            headers,
        }
    }

    pub fn parse_search(
        &self,
        response: &HttpResponse,
    ) -> Result<Option<SearchResponse>, ApiError> {
        parse_response(response)
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
