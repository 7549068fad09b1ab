//! Status-code dispatch: turns an `HttpResponse` into a decoded value or an
//! `ApiError`, without side effects.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Status codes grouped the way the dispatch treats them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    /// 100..=199
    Informational,
    /// Exactly 200.
    Success,
    /// 300..=399
    Redirect,
    Unauthorized,
    NotFound,
    /// 501..=509
    ServerError,
    /// Everything else, including 201..=299, 402, 403, 500 and 510+.
    /// The error body is inspected for a message.
    Other,
}

impl StatusBucket {
    pub fn of(status: u16) -> Self {
        match status {
            100..=199 => StatusBucket::Informational,
            200 => StatusBucket::Success,
            300..=399 => StatusBucket::Redirect,
            401 => StatusBucket::Unauthorized,
            404 => StatusBucket::NotFound,
            501..=509 => StatusBucket::ServerError,
            _ => StatusBucket::Other,
        }
    }
}

/// Map a response onto the expected payload type.
///
/// `Ok(None)` means a 200 whose body is empty or JSON `null`: neither the
/// success nor the failure path applies.
pub fn parse_response<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<Option<T>, ApiError> {
    let status = response.status;
    let message = response.reason.clone();
    match StatusBucket::of(status) {
        StatusBucket::Success => {
            if response.body_is_null() {
                return Ok(None);
            }
            serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|e| ApiError::Deserialization(e.to_string()))
        }
        StatusBucket::Informational => Err(ApiError::Informational { status, message }),
        StatusBucket::Redirect => Err(ApiError::Redirect { status, message }),
        StatusBucket::Unauthorized => Err(ApiError::Unauthorized { message }),
        StatusBucket::NotFound => Err(ApiError::NotFound { message }),
        StatusBucket::ServerError => Err(ApiError::Server { status, message }),
        StatusBucket::Other => Err(sniff_error_body(status, &response.body)),
    }
}

/// Look for `"message"`, then `"error"."text"`, in a JSON error body.
fn sniff_error_body(status: u16, body: &str) -> ApiError {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return ApiError::Unrecognized { status };
    };
    if let Some(message) = fields.get("message") {
        return ApiError::ClientMessage {
            status,
            message: json_text(message),
        };
    }
    match fields.get("error").and_then(|e| e.get("text")) {
        Some(text) => ApiError::ClientErrorText {
            status,
            message: json_text(text),
        },
        None => ApiError::Unrecognized { status },
    }
}

/// String values verbatim; `null` as empty; anything else as its JSON text.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResponse;

    fn parse(status: u16, body: &str) -> Result<Option<SearchResponse>, ApiError> {
        parse_response(&HttpResponse::new(status, body))
    }

    #[test]
    fn buckets_cover_documented_ranges() {
        assert_eq!(StatusBucket::of(100), StatusBucket::Informational);
        assert_eq!(StatusBucket::of(199), StatusBucket::Informational);
        assert_eq!(StatusBucket::of(200), StatusBucket::Success);
        assert_eq!(StatusBucket::of(201), StatusBucket::Other);
        assert_eq!(StatusBucket::of(300), StatusBucket::Redirect);
        assert_eq!(StatusBucket::of(399), StatusBucket::Redirect);
        assert_eq!(StatusBucket::of(401), StatusBucket::Unauthorized);
        assert_eq!(StatusBucket::of(402), StatusBucket::Other);
        assert_eq!(StatusBucket::of(403), StatusBucket::Other);
        assert_eq!(StatusBucket::of(404), StatusBucket::NotFound);
        assert_eq!(StatusBucket::of(500), StatusBucket::Other);
        assert_eq!(StatusBucket::of(501), StatusBucket::ServerError);
        assert_eq!(StatusBucket::of(509), StatusBucket::ServerError);
        assert_eq!(StatusBucket::of(510), StatusBucket::Other);
    }

    #[test]
    fn success_decodes_body() {
        let resp = parse(200, r#"{"total_count":3,"items":[]}"#).unwrap().unwrap();
        assert_eq!(resp.total_count, Some(3));
    }

    #[test]
    fn success_with_null_body_is_none() {
        assert_eq!(parse(200, "null").unwrap(), None);
        assert_eq!(parse(200, "").unwrap(), None);
    }

    #[test]
    fn success_with_bad_json_is_deserialization_error() {
        let err = parse(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn fixed_buckets_use_reason_phrase() {
        let err = parse(404, r#"{"message":"ignored"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound {
                message: "Not Found".into()
            }
        );

        let err = parse(503, "").unwrap_err();
        assert_eq!(err.failure(), Some(("Service Unavailable", 503)));

        let err = parse(302, "").unwrap_err();
        assert_eq!(err.failure(), Some(("Found", 302)));
        assert!(err.shows_generic_notice());
    }

    #[test]
    fn other_status_prefers_message_field() {
        let body = r#"{"message":"Validation Failed","error":{"text":"x"}}"#;
        let err = parse(422, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::ClientMessage {
                status: 422,
                message: "Validation Failed".into()
            }
        );
    }

    #[test]
    fn other_status_falls_back_to_error_text() {
        let err = parse(500, r#"{"error":{"text":"boom"}}"#).unwrap_err();
        assert_eq!(err.failure(), Some(("boom", 500)));
        assert!(err.shows_generic_notice());
    }

    #[test]
    fn other_status_without_message_is_unrecognized() {
        assert_eq!(parse(402, "{}").unwrap_err(), ApiError::Unrecognized { status: 402 });
        assert_eq!(
            parse(403, "<html>denied</html>").unwrap_err(),
            ApiError::Unrecognized { status: 403 }
        );
        assert_eq!(
            parse(400, r#"{"error":"flat"}"#).unwrap_err(),
            ApiError::Unrecognized { status: 400 }
        );
    }

    #[test]
    fn non_string_message_is_stringified() {
        let err = parse(429, r#"{"message":12}"#).unwrap_err();
        assert_eq!(err.failure(), Some(("12", 429)));
    }
}
