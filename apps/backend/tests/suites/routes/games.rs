use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use tarot_backend::GameStatus;

use crate::common::assert_problem_details_structure;
use crate::support::app_builder::create_test_app;
use crate::support::factory::{seed_distribution, seed_game};
use crate::support::test_state::sqlite_state;

#[actix_web::test]
async fn status_updates_follow_the_lifecycle() {
    let state = sqlite_state().await;
    let generated = seed_distribution(state.db().unwrap(), 21, 1).await;
    let game = seed_game(state.db().unwrap(), generated.hash_code.as_str(), GameStatus::Bidding).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{}/status", game.id))
        .set_json(json!({"status": "SCORING"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "SCORING");
    assert_eq!(body["distribution_id"], generated.id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{}/status", game.id))
        .set_json(json!({"status": "PLAYING"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "GAME_FINISHED").await;
}

#[actix_web::test]
async fn bad_status_and_unknown_game() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::put()
        .uri("/api/games/1/status")
        .set_json(json!({"status": "NAPPING"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "VALIDATION_ERROR").await;

    let req = test::TestRequest::put()
        .uri("/api/games/1/status")
        .set_json(json!({"status": "END"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "GAME_NOT_FOUND").await;

    let req = test::TestRequest::put()
        .uri("/api/games/1/status")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"status\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;
}
