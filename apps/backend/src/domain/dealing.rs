//! Deterministic card dealing logic.

use serde::Serialize;

use super::canonical::sort_hand;
use super::cards_types::Card;
use super::deck::{ensure_permutation, DECK_SIZE};
use super::identifiers::DealNumber;
use super::seed_derivation::derive_seed;
use super::shuffle::shuffled_deck;
use crate::errors::domain::DomainError;

/// Version of the frozen chain: seed derivation, shuffle and deal offsets.
pub const DEAL_PROTOCOL_VERSION: u32 = 1;

pub const SEAT_COUNT: usize = 4;
pub const HAND_SIZE: usize = 18;
pub const DOG_SIZE: usize = 6;

const _: () = assert!(SEAT_COUNT * HAND_SIZE + DOG_SIZE == DECK_SIZE);

/// Four hands and the dog, in dealt order unless canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deal {
    pub hands: [Vec<Card>; SEAT_COUNT],
    pub dog: Vec<Card>,
}

impl Deal {
    /// Each hand and the dog sorted into canonical order.
    pub fn canonicalized(&self) -> Deal {
        Deal {
            hands: self.hands.clone().map(|h| sort_hand(&h)),
            dog: sort_hand(&self.dog),
        }
    }

    /// All 78 cards: seat 0..3 then the dog.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.hands.iter().flatten().chain(self.dog.iter())
    }
}

/// Slice a shuffled deck into hands and dog at fixed offsets.
///
/// Positions 0-17 go to seat 0, 18-35 to seat 1, 36-53 to seat 2,
/// 54-71 to seat 3 and 72-77 to the dog.
pub fn deal(permutation: &[Card]) -> Result<Deal, DomainError> {
    ensure_permutation(permutation)?;

    let mut hands: [Vec<Card>; SEAT_COUNT] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        *hand_slot = permutation[start..start + HAND_SIZE].to_vec();
    }
    let dog = permutation[SEAT_COUNT * HAND_SIZE..].to_vec();

    Ok(Deal { hands, dog })
}

/// Deck order for a distribution: canonical deck shuffled with the derived seed.
pub fn deck_order_for(distribution_number: &DealNumber, sequence_number: &DealNumber) -> Vec<Card> {
    shuffled_deck(derive_seed(distribution_number, sequence_number))
}

/// Recompute the deal for a distribution. Pure; hands are in dealt order.
pub fn deal_cards_with_seed(
    distribution_number: &DealNumber,
    sequence_number: &DealNumber,
) -> Result<Deal, DomainError> {
    deal(&deck_order_for(distribution_number, sequence_number))
}
