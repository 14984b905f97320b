//! Assertions on the tarot backend's problem+json error bodies.
//!
//! Kept free of backend types so the backend's own unit tests can use it.

use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

fn check(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    want_status: StatusCode,
    want_code: &str,
    detail_fragment: Option<&str>,
) {
    assert_eq!(status, want_status, "status; body {}", String::from_utf8_lossy(body));

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(content_type, "application/problem+json");

    let parsed: ErrorBody = serde_json::from_slice(body)
        .unwrap_or_else(|e| panic!("not an error body ({e}): {}", String::from_utf8_lossy(body)));
    assert_eq!(parsed.code, want_code);
    assert_eq!(parsed.status, want_status.as_u16());
    assert!(parsed.kind.ends_with(want_code), "type {} for {want_code}", parsed.kind);
    assert!(!parsed.title.is_empty());

    let header_trace = headers.get("x-trace-id").and_then(|v| v.to_str().ok());
    assert_eq!(header_trace, Some(parsed.trace_id.as_str()));

    if let Some(fragment) = detail_fragment {
        assert!(
            parsed.detail.contains(fragment),
            "detail {:?} lacks {fragment:?}",
            parsed.detail
        );
    }
}

/// Check an `HttpResponse` built directly from an `AppError`.
pub async fn assert_error_response(
    resp: actix_web::HttpResponse,
    want_status: StatusCode,
    want_code: &str,
    detail_fragment: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    check(status, &headers, &body, want_status, want_code, detail_fragment);
}

/// Check a response returned by a test service.
pub async fn assert_error_service_response(
    resp: actix_web::dev::ServiceResponse,
    want_status: StatusCode,
    want_code: &str,
    detail_fragment: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    check(status, &headers, &body, want_status, want_code, detail_fragment);
}
