//! Distribution services: generation, lookup behind the reveal gate, usage
//! accounting and integrity verification.

use std::sync::Arc;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::dealing::{deck_order_for, SEAT_COUNT};
use crate::domain::{
    deal, hash_code, Card, Deal, DealNumber, HashCode, RevealState, DEAL_PROTOCOL_VERSION,
};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::repos::distributions::{self as distributions_repo, Distribution};
use crate::repos::games as games_repo;
use crate::services::allocator::{IdentifierAllocator, RandomAllocator};
use crate::web::timestamps::rfc3339;

/// A freshly created distribution with its full deal, for immediate use by
/// the caller that will seat the players. Hands are in dealt order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDistribution {
    pub id: i64,
    pub distribution_number: DealNumber,
    pub sequence_number: DealNumber,
    pub hash_code: HashCode,
    pub deck_order: Vec<Card>,
    pub hands: [Vec<Card>; SEAT_COUNT],
    pub dog: Vec<Card>,
}

/// Public view of a distribution looked up by hash code.
///
/// `hands` and `dog` are only present once the deal is revealed, and are
/// then canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionView {
    pub distribution_number: DealNumber,
    pub sequence_number: DealNumber,
    pub hash_code: HashCode,
    pub used_count: u32,
    pub created_at: String,
    pub can_view_details: bool,
    pub hands: Option<[Vec<Card>; SEAT_COUNT]>,
    pub dog: Option<Vec<Card>>,
    pub games_played: u64,
}

/// Outcome of a successful integrity check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    pub hash_code: HashCode,
    pub distribution_number: DealNumber,
    pub sequence_number: DealNumber,
    pub protocol_version: u32,
    pub consistent: bool,
}

/// Distribution domain service.
#[derive(Debug, Clone)]
pub struct DistributionService {
    allocator: Arc<dyn IdentifierAllocator>,
}

impl DistributionService {
    pub fn new(allocator: Arc<dyn IdentifierAllocator>) -> Self {
        Self { allocator }
    }

    /// Allocate identifiers, deal, and persist.
    ///
    /// A clash with existing identifiers is returned as a conflict; retrying
    /// with fresh identifiers is the caller's decision.
    pub async fn generate_distribution<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<GeneratedDistribution, DomainError> {
        let (distribution_number, sequence_number) = self.allocator.allocate()?;
        self.create_distribution(conn, distribution_number, sequence_number)
            .await
    }

    /// Deal and persist a distribution for caller-supplied identifiers.
    pub async fn create_distribution<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        distribution_number: DealNumber,
        sequence_number: DealNumber,
    ) -> Result<GeneratedDistribution, DomainError> {
        if distributions_repo::identifiers_taken(conn, &distribution_number, &sequence_number)
            .await?
        {
            warn!(
                distribution_number = %distribution_number,
                sequence_number = %sequence_number,
                "Distribution identifiers already in use"
            );
            return Err(DomainError::conflict(
                ConflictKind::DistributionExists,
                format!("Distribution ({distribution_number}, {sequence_number}) already exists"),
            ));
        }

        let deck_order = deck_order_for(&distribution_number, &sequence_number);
        let Deal { hands, dog } = deal(&deck_order)?;
        let code = hash_code(&distribution_number, &sequence_number);

        let stored = distributions_repo::create_distribution(
            conn,
            &distribution_number,
            &sequence_number,
            &code,
            &deck_order,
        )
        .await?;

        info!(
            distribution_id = stored.id,
            hash_code = %code,
            protocol_version = DEAL_PROTOCOL_VERSION,
            "Distribution created"
        );

        Ok(GeneratedDistribution {
            id: stored.id,
            distribution_number,
            sequence_number,
            hash_code: code,
            deck_order,
            hands,
            dog,
        })
    }

    /// Look up a distribution by its public code, revealing the cards only
    /// when at least one referencing game has finished.
    pub async fn lookup_by_code<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        code: &str,
    ) -> Result<DistributionView, DomainError> {
        let code = HashCode::parse(code)?;
        let distribution = distributions_repo::require_by_hash_code(conn, &code).await?;
        let games_played = games_repo::count_terminal_games(conn, distribution.id).await?;
        let reveal = RevealState::from_terminal_count(games_played);

        let (hands, dog) = match reveal {
            RevealState::Sealed => (None, None),
            RevealState::Revealed => {
                let canonical = recompute_checked(&distribution)?.canonicalized();
                (Some(canonical.hands), Some(canonical.dog))
            }
        };

        Ok(DistributionView {
            distribution_number: distribution.distribution_number,
            sequence_number: distribution.sequence_number,
            hash_code: distribution.hash_code,
            used_count: distribution.used_count,
            created_at: rfc3339(distribution.created_at),
            can_view_details: reveal.can_view_details(),
            hands,
            dog,
            games_played,
        })
    }

    /// Count one more game against a distribution.
    pub async fn record_usage<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        distribution_id: i64,
    ) -> Result<(), DomainError> {
        distributions_repo::increment_used_count(conn, distribution_id).await
    }

    /// Recompute a distribution from its identifiers and compare it with
    /// what was persisted.
    pub async fn verify_distribution<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        code: &str,
    ) -> Result<VerificationReport, DomainError> {
        let code = HashCode::parse(code)?;
        let distribution = distributions_repo::require_by_hash_code(conn, &code).await?;
        recompute_checked(&distribution)?;

        Ok(VerificationReport {
            hash_code: distribution.hash_code,
            distribution_number: distribution.distribution_number,
            sequence_number: distribution.sequence_number,
            protocol_version: DEAL_PROTOCOL_VERSION,
            consistent: true,
        })
    }
}

impl Default for DistributionService {
    fn default() -> Self {
        Self::new(Arc::new(RandomAllocator))
    }
}

/// Recompute the deal and require it to match the persisted record.
///
/// A mismatch means the deal protocol changed underneath stored data. It is
/// never corrected here.
fn recompute_checked(distribution: &Distribution) -> Result<Deal, DomainError> {
    let expected_code = hash_code(
        &distribution.distribution_number,
        &distribution.sequence_number,
    );
    if expected_code != distribution.hash_code {
        error!(
            distribution_id = distribution.id,
            distribution_number = %distribution.distribution_number,
            sequence_number = %distribution.sequence_number,
            stored_hash_code = %distribution.hash_code,
            recomputed_hash_code = %expected_code,
            "Hash code integrity violation"
        );
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!(
                "Stored hash code for distribution {} does not match its identifiers",
                distribution.id
            ),
        ));
    }

    let recomputed = deck_order_for(
        &distribution.distribution_number,
        &distribution.sequence_number,
    );
    if let Some(position) = recomputed
        .iter()
        .zip(distribution.deck_order.iter())
        .position(|(a, b)| a != b)
    {
        error!(
            distribution_id = distribution.id,
            distribution_number = %distribution.distribution_number,
            sequence_number = %distribution.sequence_number,
            hash_code = %distribution.hash_code,
            position,
            "Deck order integrity violation"
        );
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!(
                "Recomputed deck order for {} differs from the stored one at position {position}",
                distribution.hash_code
            ),
        ));
    }

    deal(&recomputed)
}
