//! Domain DTOs for the repository search API.
//!
//! # Design
//! The upstream API may omit or null out any field, so every field is an
//! `Option`. Accessors expose the defaults hosts display when a value is
//! missing, which keeps null checks out of the rendering code. Null entries
//! inside `items` are dropped during decoding; a missing `items` array stays
//! `None` so the view-model can tell "no list" apart from "empty list".

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level body of `GET /search/repositories`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: Option<bool>,
    #[serde(default, deserialize_with = "non_null_items")]
    pub items: Option<Vec<SearchItem>>,
}

impl SearchResponse {
    /// Number of decoded items, zero when the list is absent.
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }
}

/// One repository in the search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub watchers_count: Option<u64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl SearchItem {
    /// `owner/name`, or `""` when absent.
    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Description, or `"N/A"` when absent.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("N/A")
    }

    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn watchers(&self) -> u64 {
        self.watchers_count.unwrap_or(0)
    }

    pub fn score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    /// Owner avatar; hosts substitute their own placeholder on `None`.
    pub fn avatar_url(&self) -> Option<&str> {
        self.owner.as_ref().and_then(|o| o.avatar_url.as_deref())
    }

    pub fn created(&self) -> String {
        format_timestamp(self.created_at.as_deref())
    }

    pub fn updated(&self) -> String {
        format_timestamp(self.updated_at.as_deref())
    }
}

/// Render a UTC `yyyy-MM-ddTHH:mm:ssZ` timestamp as `yyyy-MM-dd hh:mm AM`.
///
/// `None` renders as `""`; a value that does not parse is returned as-is.
pub fn format_timestamp(utc: Option<&str>) -> String {
    let Some(raw) = utc else {
        return String::new();
    };
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ") {
        Ok(parsed) => parsed.format("%Y-%m-%d %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn non_null_items<'de, D>(deserializer: D) -> Result<Option<Vec<SearchItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<SearchItem>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|items| items.into_iter().flatten().collect()))
}
