use tarot_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use tarot_backend::{GameService, GameStatus};

use crate::support::factory::{seed_distribution, seed_game};
use crate::support::test_state::sqlite_state;

#[tokio::test]
async fn start_game_counts_usage() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 11, 1).await;

    let game = GameService::new()
        .start_game(db, generated.hash_code.as_str())
        .await
        .unwrap();
    assert_eq!(game.status, GameStatus::Waiting);
    assert_eq!(game.distribution_id, generated.id);

    let view = state
        .distributions()
        .lookup_by_code(db, generated.hash_code.as_str())
        .await
        .unwrap();
    assert_eq!(view.used_count, 1);
}

#[tokio::test]
async fn start_game_on_unknown_code_is_not_found() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let err = GameService::new()
        .start_game(db, "0000000000")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Distribution, _)
    ));
}

#[tokio::test]
async fn finished_games_cannot_resume() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 12, 1).await;
    let game = seed_game(db, generated.hash_code.as_str(), GameStatus::Scoring).await;

    let err = GameService::new()
        .update_status(db, game.id, GameStatus::Playing)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::GameFinished, _)));

    let ended = GameService::new()
        .update_status(db, game.id, GameStatus::End)
        .await
        .unwrap();
    assert_eq!(ended.status, GameStatus::End);
}

#[tokio::test]
async fn update_of_unknown_game_is_not_found() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let err = GameService::new()
        .update_status(db, 31337, GameStatus::End)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
}

#[tokio::test]
async fn concurrent_resume_cannot_undo_a_finish() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 13, 1).await;
    let service = GameService::new();

    for _ in 0..8 {
        let game = seed_game(db, generated.hash_code.as_str(), GameStatus::Playing).await;

        let (ended, resumed) = tokio::join!(
            service.update_status(db, game.id, GameStatus::End),
            service.update_status(db, game.id, GameStatus::Dealing),
        );
        assert_eq!(ended.unwrap().status, GameStatus::End);
        match resumed {
            Ok(game) => assert_eq!(game.status, GameStatus::Dealing),
            Err(DomainError::Conflict(ConflictKind::GameFinished, _)) => {}
            Err(other) => panic!("expected GameFinished conflict, got {other:?}"),
        }

        let stored = tarot_backend::repos::games::require_game(db, game.id)
            .await
            .unwrap();
        assert_eq!(stored.status, GameStatus::End);
    }

    let view = state
        .distributions()
        .lookup_by_code(db, generated.hash_code.as_str())
        .await
        .unwrap();
    assert!(view.can_view_details);
}
