use tarot_backend::adapters::distributions_sea::{self as distributions_adapter, DistributionCreate};
use tarot_backend::adapters::tarot_games_sea::{self as games_adapter, TarotGameCreate};
use tarot_backend::entities::tarot_games::TarotGameStatus;
use tarot_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use tarot_backend::infra::db_errors::map_db_err;

use crate::support::test_state::sqlite_state;

#[tokio::test]
async fn new_games_wait_and_only_terminal_ones_count() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let dist = distributions_adapter::create_distribution(
        db,
        DistributionCreate::new("3", "3", "0000000033", "[]"),
    )
    .await
    .unwrap();

    let waiting = games_adapter::create_game(db, TarotGameCreate::new(dist.id))
        .await
        .unwrap();
    assert_eq!(waiting.status, TarotGameStatus::Waiting);
    assert_eq!(waiting.distribution_id, dist.id);

    games_adapter::create_game(
        db,
        TarotGameCreate::new(dist.id).with_status(TarotGameStatus::Playing),
    )
    .await
    .unwrap();
    assert_eq!(
        games_adapter::count_terminal_for_distribution(db, dist.id)
            .await
            .unwrap(),
        0
    );

    let scored = games_adapter::update_status(db, waiting.id, TarotGameStatus::Scoring)
        .await
        .unwrap();
    assert_eq!(scored.status, TarotGameStatus::Scoring);
    assert!(scored.updated_at >= waiting.updated_at);

    games_adapter::create_game(
        db,
        TarotGameCreate::new(dist.id).with_status(TarotGameStatus::End),
    )
    .await
    .unwrap();
    assert_eq!(
        games_adapter::count_terminal_for_distribution(db, dist.id)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn updating_missing_game_is_not_found() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let err = games_adapter::update_status(db, 777, TarotGameStatus::End)
        .await
        .unwrap_err();
    match map_db_err(err) {
        DomainError::NotFound(NotFoundKind::Game, _) => {}
        other => panic!("expected Game not found, got {other:?}"),
    }
}

#[tokio::test]
async fn finished_game_write_is_guarded() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let dist = distributions_adapter::create_distribution(
        db,
        DistributionCreate::new("4", "4", "0000000044", "[]"),
    )
    .await
    .unwrap();
    let game = games_adapter::create_game(
        db,
        TarotGameCreate::new(dist.id).with_status(TarotGameStatus::End),
    )
    .await
    .unwrap();

    let err = games_adapter::update_status(db, game.id, TarotGameStatus::Playing)
        .await
        .unwrap_err();
    match map_db_err(err) {
        DomainError::Conflict(ConflictKind::GameFinished, _) => {}
        other => panic!("expected GameFinished conflict, got {other:?}"),
    }

    let stored = games_adapter::find_by_id(db, game.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TarotGameStatus::End);

    let scored = games_adapter::update_status(db, game.id, TarotGameStatus::Scoring)
        .await
        .unwrap();
    assert_eq!(scored.status, TarotGameStatus::Scoring);
}
