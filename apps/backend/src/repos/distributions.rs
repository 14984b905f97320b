//! Distribution repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::distributions_sea as distributions_adapter;
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::deck::ensure_permutation;
use crate::domain::{Card, DealNumber, HashCode};
use crate::entities::distributions;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Distribution domain model
///
/// Converted from `distributions::Model`. Conversion re-validates the stored
/// identifiers, hash code and deck order; any failure means the row was
/// altered outside this service and is reported as data corruption.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub id: i64,
    pub distribution_number: DealNumber,
    pub sequence_number: DealNumber,
    pub hash_code: HashCode,
    pub deck_order: Vec<Card>,
    pub used_count: u32,
    pub created_at: time::OffsetDateTime,
}

fn corrupt(id: i64, what: &str) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Distribution {id} has an invalid stored {what}"),
    )
}

impl TryFrom<distributions::Model> for Distribution {
    type Error = DomainError;

    fn try_from(model: distributions::Model) -> Result<Self, Self::Error> {
        let id = model.id;
        let distribution_number = DealNumber::parse(&model.distribution_number)
            .map_err(|_| corrupt(id, "distribution number"))?;
        let sequence_number = DealNumber::parse(&model.sequence_number)
            .map_err(|_| corrupt(id, "sequence number"))?;
        let hash_code = HashCode::parse(&model.hash_code).map_err(|_| corrupt(id, "hash code"))?;

        let tokens: Vec<String> =
            serde_json::from_str(&model.deck_order).map_err(|_| corrupt(id, "deck order"))?;
        let deck_order = try_parse_cards(&tokens).map_err(|_| corrupt(id, "deck order"))?;
        ensure_permutation(&deck_order).map_err(|_| corrupt(id, "deck order"))?;

        let used_count = u32::try_from(model.used_count).map_err(|_| corrupt(id, "used count"))?;

        Ok(Self {
            id,
            distribution_number,
            sequence_number,
            hash_code,
            deck_order,
            used_count,
            created_at: model.created_at,
        })
    }
}

/// JSON array of card tokens, the persisted form of `deck_order`.
pub fn encode_deck_order(deck_order: &[Card]) -> Result<String, DomainError> {
    serde_json::to_string(deck_order).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("Failed to encode deck order: {e}"),
        )
    })
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Distribution>, DomainError> {
    distributions_adapter::find_by_id(conn, id)
        .await?
        .map(Distribution::try_from)
        .transpose()
}

pub async fn find_by_hash_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hash_code: &HashCode,
) -> Result<Option<Distribution>, DomainError> {
    distributions_adapter::find_by_hash_code(conn, hash_code.as_str())
        .await?
        .map(Distribution::try_from)
        .transpose()
}

/// Find by hash code or return NotFound without revealing anything else.
pub async fn require_by_hash_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hash_code: &HashCode,
) -> Result<Distribution, DomainError> {
    find_by_hash_code(conn, hash_code).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Distribution,
            format!("No distribution with hash code {hash_code}"),
        )
    })
}

pub async fn find_by_identifiers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_number: &DealNumber,
    sequence_number: &DealNumber,
) -> Result<Option<Distribution>, DomainError> {
    distributions_adapter::find_by_identifiers(
        conn,
        distribution_number.as_str(),
        sequence_number.as_str(),
    )
    .await?
    .map(Distribution::try_from)
    .transpose()
}

/// Existence check that does not decode the row.
pub async fn identifiers_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_number: &DealNumber,
    sequence_number: &DealNumber,
) -> Result<bool, DomainError> {
    let row = distributions_adapter::find_by_identifiers(
        conn,
        distribution_number.as_str(),
        sequence_number.as_str(),
    )
    .await?;
    Ok(row.is_some())
}

pub async fn create_distribution<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_number: &DealNumber,
    sequence_number: &DealNumber,
    hash_code: &HashCode,
    deck_order: &[Card],
) -> Result<Distribution, DomainError> {
    let dto = distributions_adapter::DistributionCreate::new(
        distribution_number.as_str(),
        sequence_number.as_str(),
        hash_code.as_str(),
        encode_deck_order(deck_order)?,
    );
    let model = distributions_adapter::create_distribution(conn, dto).await?;
    Distribution::try_from(model)
}

/// Atomic `used_count += 1`.
pub async fn increment_used_count<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    distributions_adapter::increment_used_count(conn, id).await?;
    Ok(())
}
