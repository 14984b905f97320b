use actix_web::test;
use serde_json::{json, Value};
use tarot_backend::AppState;

use crate::common::assert_problem_details_structure;
use crate::support::app_builder::create_test_app;

#[actix_web::test]
async fn deal_recomputation_needs_no_database() {
    let app = create_test_app(AppState::default()).await;

    let req = test::TestRequest::get().uri("/api/deals/1/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["hash_code"], "P5GTAGXPNJ");
    assert_eq!(body["protocol_version"], 1);
    assert_eq!(body["dog"], json!(["T19", "4S", "KS", "8D", "4C", "QC"]));
    assert_eq!(
        body["hands"][0],
        json!([
            "T6", "T8", "T10", "T12", "QS", "2H", "3H", "6H", "7H", "NH", "QH", "2D", "4D", "9D",
            "QD", "6C", "7C", "JC"
        ])
    );
}

#[actix_web::test]
async fn leading_zeros_and_wide_numbers() {
    let app = create_test_app(AppState::default()).await;

    let req = test::TestRequest::get()
        .uri("/api/deals/00018446744073709551616/042")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["hash_code"], "D01C0224ZX");
    assert_eq!(body["distribution_number"], "18446744073709551616");
    assert_eq!(body["sequence_number"], "42");
}

#[actix_web::test]
async fn non_numeric_identifiers_are_rejected() {
    let app = create_test_app(AppState::default()).await;

    for uri in ["/api/deals/-1/1", "/api/deals/1/1e3", "/api/deals/x/y"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "INVALID_ARGUMENT").await;
    }
}
