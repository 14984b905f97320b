use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_contract::assert_error_service_response;
use serde_json::json;
use tarot_backend::AppState;

use crate::common::assert_problem_details_structure;
use crate::support::app_builder::create_test_app;

#[actix_web::test]
async fn missing_database_is_503_problem_details() {
    let app = create_test_app(AppState::default()).await;

    let req = test::TestRequest::get()
        .uri("/api/distributions/P5GTAGXPNJ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_problem_details_structure(resp, 503, "DB_UNAVAILABLE").await;
    assert_eq!(body["title"], "Db Unavailable");
}

#[actix_web::test]
async fn trace_id_matches_request_id() {
    let app = create_test_app(AppState::default()).await;

    let req = test::TestRequest::post()
        .uri("/api/distributions")
        .set_json(json!({"distribution_number": "1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id header");
    let body = assert_problem_details_structure(resp, 400, "INVALID_ARGUMENT").await;
    assert_eq!(body["trace_id"], request_id);
}

#[actix_web::test]
async fn unknown_code_matches_stable_contract() {
    let app = create_test_app(crate::support::test_state::sqlite_state().await).await;

    let req = test::TestRequest::get()
        .uri("/api/distributions/ABCDEFGHJK")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_service_response(
        resp,
        StatusCode::NOT_FOUND,
        "DISTRIBUTION_NOT_FOUND",
        Some("ABCDEFGHJK"),
    )
    .await;
}
