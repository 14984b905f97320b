use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::allocators::FixedAllocator;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::{sqlite_state, sqlite_state_with};

#[actix_web::test]
async fn empty_body_generates_with_allocator() {
    let state = sqlite_state_with(Arc::new(FixedAllocator::new(1, 1))).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/distributions")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["hash_code"], "P5GTAGXPNJ");
    assert_eq!(body["distribution_number"], "1");
    assert_eq!(body["deck_order"].as_array().unwrap().len(), 78);
    assert_eq!(body["deck_order"][0], "6C");
    assert_eq!(body["hands"].as_array().unwrap().len(), 4);
    assert_eq!(body["dog"].as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn explicit_identifiers_then_conflict() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let payload = json!({"distribution_number": "2", "sequence_number": 1});
    let req = test::TestRequest::post()
        .uri("/api/distributions")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["hash_code"], "PNFPT0JCF7");

    let req = test::TestRequest::post()
        .uri("/api/distributions")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "DISTRIBUTION_CONFLICT").await;
}

#[actix_web::test]
async fn invalid_identifiers_are_rejected() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    for payload in [
        json!({"distribution_number": "-3", "sequence_number": "1"}),
        json!({"distribution_number": "abc", "sequence_number": "1"}),
        json!({"distribution_number": 1.5, "sequence_number": 1}),
        json!({"sequence_number": 1}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/distributions")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "INVALID_ARGUMENT").await;
    }
}

#[actix_web::test]
async fn lookup_is_sealed_until_a_game_finishes() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/distributions")
        .set_json(json!({"distribution_number": "1", "sequence_number": "1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/distributions/p5gtagxpnj")
        .to_request();
    let sealed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(sealed["can_view_details"], false);
    assert!(sealed["hands"].is_null());
    assert!(sealed["dog"].is_null());
    assert_eq!(sealed["games_played"], 0);

    let req = test::TestRequest::post()
        .uri("/api/distributions/P5GTAGXPNJ/games")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let game: Value = test::read_body_json(resp).await;
    assert_eq!(game["status"], "WAITING");
    let game_id = game["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{game_id}/status"))
        .set_json(json!({"status": "END"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/distributions/P5GTAGXPNJ")
        .to_request();
    let revealed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(revealed["can_view_details"], true);
    assert_eq!(revealed["used_count"], 1);
    assert_eq!(revealed["games_played"], 1);
    assert_eq!(revealed["dog"], json!(["T19", "4S", "KS", "8D", "4C", "QC"]));
    assert_eq!(revealed["hands"][3][0], "EX");
}

#[actix_web::test]
async fn lookup_errors() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/distributions/ILLEGAL!!!")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_HASH_CODE").await;

    let req = test::TestRequest::get()
        .uri("/api/distributions/0000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "DISTRIBUTION_NOT_FOUND").await;
}

#[actix_web::test]
async fn verify_endpoint_reports_consistency() {
    let state = sqlite_state_with(Arc::new(FixedAllocator::new(0, 0))).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/distributions")
        .set_payload("{}")
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/distributions/MNP0TJA021/verify")
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report["consistent"], true);
    assert_eq!(report["protocol_version"], 1);
    assert_eq!(report["distribution_number"], "0");
}
