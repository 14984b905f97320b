//! Identifier allocation for new distributions.
//!
//! Choosing distribution and sequence numbers belongs to the table service.
//! This seam lets it plug in its own policy; the default draws random pairs.

use std::fmt::Debug;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::domain::DealNumber;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Source of `(distribution_number, sequence_number)` pairs for new deals.
///
/// Allocators need not guarantee uniqueness: a pair that already exists is
/// rejected with a conflict and the caller may ask again.
pub trait IdentifierAllocator: Send + Sync + Debug {
    fn allocate(&self) -> Result<(DealNumber, DealNumber), DomainError>;
}

/// Two independent 64-bit values from the operating system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAllocator;

impl IdentifierAllocator for RandomAllocator {
    fn allocate(&self) -> Result<(DealNumber, DealNumber), DomainError> {
        let mut rng = OsRng;
        let mut draw = || {
            rng.try_next_u64().map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::Other("Rng".into()),
                    format!("OS random source failed: {e}"),
                )
            })
        };
        let distribution_number = draw()?;
        let sequence_number = draw()?;
        Ok((
            DealNumber::from(distribution_number),
            DealNumber::from(sequence_number),
        ))
    }
}
