use futures_util::future::join_all;
use tarot_backend::adapters::distributions_sea::{self as distributions_adapter, DistributionCreate};
use tarot_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use tarot_backend::infra::db_errors::map_db_err;

use crate::support::test_state::sqlite_state;

fn dto(dn: &str, sn: &str, code: &str) -> DistributionCreate {
    DistributionCreate::new(dn, sn, code, "[]")
}

#[tokio::test]
async fn create_then_find_by_every_key() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let created = distributions_adapter::create_distribution(db, dto("12", "34", "ABCDEFGHJK"))
        .await
        .unwrap();
    assert_eq!(created.used_count, 0);
    assert_eq!(created.distribution_number, "12");

    let by_id = distributions_adapter::find_by_id(db, created.id).await.unwrap();
    let by_code = distributions_adapter::find_by_hash_code(db, "ABCDEFGHJK")
        .await
        .unwrap();
    let by_ids = distributions_adapter::find_by_identifiers(db, "12", "34")
        .await
        .unwrap();

    assert_eq!(by_id.as_ref(), Some(&created));
    assert_eq!(by_code.as_ref(), Some(&created));
    assert_eq!(by_ids.as_ref(), Some(&created));

    assert!(distributions_adapter::find_by_identifiers(db, "34", "12")
        .await
        .unwrap()
        .is_none());
    assert!(distributions_adapter::find_by_hash_code(db, "ZZZZZZZZZZ")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_identifiers_conflict_and_keep_original() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let original = distributions_adapter::create_distribution(db, dto("5", "6", "0000000001"))
        .await
        .unwrap();

    let err = distributions_adapter::create_distribution(db, dto("5", "6", "0000000002"))
        .await
        .unwrap_err();
    match map_db_err(err) {
        DomainError::Conflict(ConflictKind::DistributionExists, _) => {}
        other => panic!("expected DistributionExists, got {other:?}"),
    }

    let stored = distributions_adapter::find_by_id(db, original.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, original);
    assert!(distributions_adapter::find_by_hash_code(db, "0000000002")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_hash_code_is_a_collision() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    distributions_adapter::create_distribution(db, dto("1", "1", "0000000003"))
        .await
        .unwrap();
    let err = distributions_adapter::create_distribution(db, dto("1", "2", "0000000003"))
        .await
        .unwrap_err();

    match map_db_err(err) {
        DomainError::Conflict(ConflictKind::HashCodeCollision, _) => {}
        other => panic!("expected HashCodeCollision, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let state = sqlite_state().await;
    let db = state.db().unwrap().clone();

    let created = distributions_adapter::create_distribution(&db, dto("9", "9", "0000000009"))
        .await
        .unwrap();

    let tasks = (0..16).map(|_| {
        let db = db.clone();
        let id = created.id;
        tokio::spawn(async move { distributions_adapter::increment_used_count(&db, id).await })
    });
    for outcome in join_all(tasks).await {
        outcome.expect("task panicked").expect("increment");
    }

    let stored = distributions_adapter::find_by_id(&db, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.used_count, 16);
}

#[tokio::test]
async fn increment_of_missing_row_is_not_found() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let err = distributions_adapter::increment_used_count(db, 4242)
        .await
        .unwrap_err();
    match map_db_err(err) {
        DomainError::NotFound(NotFoundKind::Distribution, detail) => {
            assert!(detail.contains("4242"));
        }
        other => panic!("expected Distribution not found, got {other:?}"),
    }
}
