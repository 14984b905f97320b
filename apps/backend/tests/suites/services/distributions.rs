use std::collections::HashSet;
use std::sync::Arc;

use backend_test_support::unique_helpers::unique_decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tarot_backend::entities::distributions;
use tarot_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use tarot_backend::repos::distributions as distributions_repo;
use tarot_backend::{deal_cards_with_seed, hash_code, DealNumber, DistributionService};

use crate::support::allocators::{FixedAllocator, SequenceAllocator};
use crate::support::factory::seed_distribution;
use crate::support::test_state::{sqlite_state, sqlite_state_with};

#[tokio::test]
async fn generated_distribution_matches_pure_deal() {
    let state = sqlite_state_with(Arc::new(FixedAllocator::new(1, 1))).await;
    let db = state.db().unwrap();

    let generated = state.distributions().generate_distribution(db).await.unwrap();

    let dn = DealNumber::from(1u64);
    let sn = DealNumber::from(1u64);
    let expected = deal_cards_with_seed(&dn, &sn).unwrap();
    assert_eq!(generated.hash_code.as_str(), "P5GTAGXPNJ");
    assert_eq!(generated.hands, expected.hands);
    assert_eq!(generated.dog, expected.dog);
    assert_eq!(generated.deck_order.len(), 78);

    let stored = distributions_repo::find_by_id(db, generated.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.deck_order, generated.deck_order);
    assert_eq!(stored.used_count, 0);
}

#[tokio::test]
async fn generate_with_taken_identifiers_conflicts() {
    let state = sqlite_state_with(Arc::new(FixedAllocator::new(4, 2))).await;
    let db = state.db().unwrap();

    let first = state.distributions().generate_distribution(db).await.unwrap();
    let err = state
        .distributions()
        .generate_distribution(db)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DistributionExists, _)
    ));

    let stored = distributions_repo::find_by_id(db, first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.hash_code, first.hash_code);
    assert_eq!(stored.used_count, 0);
}

#[tokio::test]
async fn sequence_allocator_yields_distinct_codes() {
    let state = sqlite_state_with(Arc::new(SequenceAllocator::new(77))).await;
    let db = state.db().unwrap();

    let mut codes = HashSet::new();
    for _ in 0..10 {
        let generated = state.distributions().generate_distribution(db).await.unwrap();
        assert_eq!(generated.distribution_number.as_str(), "77");
        codes.insert(generated.hash_code);
    }
    assert_eq!(codes.len(), 10);
}

#[tokio::test]
async fn wide_identifiers_round_trip_through_storage() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let dn = DealNumber::parse("18446744073709551616").unwrap();
    let sn = DealNumber::from(42u64);
    let generated = DistributionService::default()
        .create_distribution(db, dn.clone(), sn.clone())
        .await
        .unwrap();
    assert_eq!(generated.hash_code.as_str(), "D01C0224ZX");

    let view = state
        .distributions()
        .lookup_by_code(db, "d01c0224zx")
        .await
        .unwrap();
    assert_eq!(view.distribution_number, dn);
    assert_eq!(view.sequence_number, sn);
}

#[tokio::test]
async fn lookup_rejects_malformed_and_unknown_codes() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let service = state.distributions();

    let malformed = service.lookup_by_code(db, "TOO-SHORT").await.unwrap_err();
    assert!(matches!(
        malformed,
        DomainError::Validation(ValidationKind::InvalidHashCode, _)
    ));

    let unknown = hash_code(&DealNumber::from(8u64), &DealNumber::from(8u64));
    let missing = service
        .lookup_by_code(db, unknown.as_str())
        .await
        .unwrap_err();
    assert!(matches!(
        missing,
        DomainError::NotFound(NotFoundKind::Distribution, _)
    ));
}

#[tokio::test]
async fn record_usage_counts_every_call() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 10, 20).await;

    for _ in 0..3 {
        state.distributions().record_usage(db, generated.id).await.unwrap();
    }
    let view = state
        .distributions()
        .lookup_by_code(db, generated.hash_code.as_str())
        .await
        .unwrap();
    assert_eq!(view.used_count, 3);

    let err = state.distributions().record_usage(db, 99_999).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Distribution, _)
    ));
}

#[tokio::test]
async fn verify_reports_consistent_distribution() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 2, 1).await;

    let report = state
        .distributions()
        .verify_distribution(db, generated.hash_code.as_str())
        .await
        .unwrap();
    assert!(report.consistent);
    assert_eq!(report.protocol_version, 1);
    assert_eq!(report.hash_code.as_str(), "PNFPT0JCF7");
}

#[tokio::test]
async fn tampered_deck_order_is_an_integrity_violation() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 1, 2).await;

    let mut swapped = generated.deck_order.clone();
    swapped.swap(0, 77);
    let row = distributions::Entity::find_by_id(generated.id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: distributions::ActiveModel = row.into();
    active.deck_order = Set(serde_json::to_string(&swapped).unwrap());
    active.update(db).await.unwrap();

    let err = state
        .distributions()
        .verify_distribution(db, generated.hash_code.as_str())
        .await
        .unwrap_err();
    assert!(err.is_integrity_violation());
    assert!(err.to_string().contains("position 0"));
}

#[tokio::test]
async fn unreadable_deck_order_is_an_integrity_violation() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();
    let generated = seed_distribution(db, 6, 6).await;

    let row = distributions::Entity::find_by_id(generated.id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: distributions::ActiveModel = row.into();
    active.deck_order = Set(r#"["EX","XX"]"#.to_string());
    active.update(db).await.unwrap();

    let err = state
        .distributions()
        .verify_distribution(db, generated.hash_code.as_str())
        .await
        .unwrap_err();
    assert!(err.is_integrity_violation());
}

#[tokio::test]
async fn identifiers_wider_than_u64_are_stored_verbatim() {
    let state = sqlite_state().await;
    let db = state.db().unwrap();

    let dn = DealNumber::parse(&unique_decimal()).unwrap();
    let sn = DealNumber::parse(&unique_decimal()).unwrap();
    let generated = DistributionService::default()
        .create_distribution(db, dn.clone(), sn.clone())
        .await
        .unwrap();

    let stored = distributions_repo::find_by_identifiers(db, &dn, &sn)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, generated.id);
    assert_eq!(stored.hash_code, hash_code(&dn, &sn));
    assert!(distributions_repo::identifiers_taken(db, &dn, &sn).await.unwrap());
}
