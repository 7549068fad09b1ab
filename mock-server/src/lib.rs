use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Owner {
    pub avatar_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repo {
    pub full_name: String,
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub score: f64,
    pub created_at: String,
    pub updated_at: String,
    pub owner: Owner,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPage {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<Repo>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub type Catalog = Arc<Vec<Repo>>;

/// Queries of the form `status:<code>[:error|:bare|:null]` force a response:
/// `<code>` with `{"message": ...}` by default, `{"error": {"text": ...}}`
/// with `:error`, `{}` with `:bare`, and a literal `null` body with `:null`.
pub const FORCE_PREFIX: &str = "status:";

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(repos: Vec<Repo>) -> Router {
    let catalog: Catalog = Arc::new(repos);
    Router::new()
        .route("/search/repositories", get(search_repositories))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn seed() -> Vec<Repo> {
    vec![
        repo(
            "octocat",
            "Hello-World",
            Some("My first repository on GitHub!"),
            42,
            "2011-01-26T19:01:12Z",
        ),
        repo(
            "rust-lang",
            "rust",
            Some("Empowering everyone to build reliable and efficient software."),
            98000,
            "2010-06-16T20:39:03Z",
        ),
        repo(
            "tokio-rs",
            "tokio",
            Some("A runtime for writing reliable asynchronous applications with Rust."),
            27000,
            "2016-09-09T21:48:09Z",
        ),
        repo("tokio-rs", "axum", None, 19000, "2021-05-29T16:20:48Z"),
    ]
}

fn repo(owner: &str, name: &str, description: Option<&str>, stars: u64, created_at: &str) -> Repo {
    Repo {
        full_name: format!("{owner}/{name}"),
        name: name.to_string(),
        description: description.map(str::to_string),
        stargazers_count: stars,
        watchers_count: stars,
        score: 1.0,
        created_at: created_at.to_string(),
        updated_at: "2024-03-02T08:15:00Z".to_string(),
        owner: Owner {
            avatar_url: format!("https://avatars.example.com/{owner}"),
        },
    }
}

async fn search_repositories(
    State(catalog): State<Catalog>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        let valid = auth
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| !token.trim().is_empty());
        if !valid {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Bad credentials"})),
            )
                .into_response();
        }
    }

    let query = params.q.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "Validation Failed",
                "errors": [{"resource": "Search", "field": "q", "code": "missing"}]
            })),
        )
            .into_response();
    }

    if let Some(forced) = query.strip_prefix(FORCE_PREFIX) {
        return forced_response(forced);
    }

    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    let items: Vec<Repo> = catalog
        .iter()
        .filter(|r| terms.iter().all(|t| matches_term(r, t)))
        .cloned()
        .collect();
    Json(SearchPage {
        total_count: items.len() as u64,
        incomplete_results: false,
        items,
    })
    .into_response()
}

fn matches_term(repo: &Repo, term: &str) -> bool {
    repo.full_name.to_lowercase().contains(term)
        || repo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
}

fn forced_response(forced: &str) -> Response {
    let (code, variant) = forced.split_once(':').unwrap_or((forced, ""));
    let status = match code.parse::<u16>().ok().and_then(|c| StatusCode::from_u16(c).ok()) {
        Some(status) if status.as_u16() >= 200 => status,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": format!("cannot force status {code:?}")})),
            )
                .into_response()
        }
    };
    let text = format!("forced {}", status.as_u16());
    match variant {
        "error" => (status, Json(json!({"error": {"text": text}}))).into_response(),
        "bare" => (status, Json(json!({}))).into_response(),
        "null" => (status, [(header::CONTENT_TYPE, "application/json")], "null").into_response(),
        _ => (status, Json(json!({"message": text}))).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_serializes_to_search_item_shape() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["full_name"], "octocat/Hello-World");
        assert_eq!(json["stargazers_count"], 42);
        assert_eq!(json["owner"]["avatar_url"], "https://avatars.example.com/octocat");
    }

    #[test]
    fn missing_description_serializes_as_null() {
        let axum_repo = seed().into_iter().find(|r| r.name == "axum").unwrap();
        let json = serde_json::to_value(&axum_repo).unwrap();
        assert!(json["description"].is_null());
    }

    #[test]
    fn terms_match_name_or_description() {
        let repos = seed();
        assert!(matches_term(&repos[0], "octocat"));
        assert!(matches_term(&repos[2], "asynchronous"));
        assert!(!matches_term(&repos[3], "asynchronous"));
    }

    #[test]
    fn search_params_q_is_optional() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.q.is_none());
    }
}
