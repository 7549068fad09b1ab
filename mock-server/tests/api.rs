use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, SearchPage};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn search(query: &str) -> Request<String> {
    Request::builder()
        .uri(format!("/search/repositories?q={query}"))
        .body(String::new())
        .unwrap()
}

fn search_with_auth(query: &str, auth: &str) -> Request<String> {
    Request::builder()
        .uri(format!("/search/repositories?q={query}"))
        .header(http::header::AUTHORIZATION, auth)
        .body(String::new())
        .unwrap()
}

// --- matching ---

#[tokio::test]
async fn search_finds_octocat() {
    let resp = app().oneshot(search("octocat")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: SearchPage = body_json(resp).await;
    assert_eq!(page.total_count, 1);
    assert!(!page.incomplete_results);
    assert_eq!(page.items[0].full_name, "octocat/Hello-World");
    assert_eq!(page.items[0].stargazers_count, 42);
}

#[tokio::test]
async fn search_terms_are_case_insensitive_and_conjunctive() {
    let resp = app().oneshot(search("TOKIO+rust")).await.unwrap();
    let page: SearchPage = body_json(resp).await;
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].full_name, "tokio-rs/tokio");
}

#[tokio::test]
async fn search_without_matches_returns_empty_page() {
    let resp = app().oneshot(search("zzz-no-such-repo")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: SearchPage = body_json(resp).await;
    assert_eq!(page.total_count, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn empty_catalog_matches_nothing() {
    let resp = app_with(Vec::new()).oneshot(search("rust")).await.unwrap();
    let page: SearchPage = body_json(resp).await;
    assert!(page.items.is_empty());
}

// --- validation ---

#[tokio::test]
async fn missing_query_returns_422_with_message() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/search/repositories")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Validation Failed");
}

// --- authorization ---

#[tokio::test]
async fn bearer_token_is_accepted() {
    let resp = app()
        .oneshot(search_with_auth("octocat", "Bearer abc123"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_authorization_returns_401() {
    let resp = app()
        .oneshot(search_with_auth("octocat", "token abc123"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Bad credentials");
}

#[tokio::test]
async fn blank_bearer_token_returns_401() {
    let resp = app()
        .oneshot(search_with_auth("octocat", "Bearer "))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- forced statuses ---

#[tokio::test]
async fn forced_status_carries_message() {
    let resp = app().oneshot(search("status:402")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "forced 402");
}

#[tokio::test]
async fn forced_status_with_error_text() {
    let resp = app().oneshot(search("status:500:error")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["text"], "forced 500");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn forced_bare_status_has_empty_object() {
    let resp = app().oneshot(search("status:403:bare")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn forced_null_body() {
    let resp = app().oneshot(search("status:200:null")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"null");
}

#[tokio::test]
async fn informational_or_garbage_codes_cannot_be_forced() {
    for query in ["status:101", "status:abc", "status:99"] {
        let resp = app().oneshot(search(query)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{query}");
    }
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app()
        .oneshot(Request::builder().uri("/search/users?q=x").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
