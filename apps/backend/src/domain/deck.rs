//! The fixed 78-card universe and its canonical order.

use super::cards_types::{Card, Suit, SuitRank, TrumpRank};
use crate::errors::domain::{DomainError, ValidationKind};

pub const DECK_SIZE: usize = 78;
pub const TRUMP_COUNT: usize = 21;
pub const SUIT_SIZE: usize = 14;

/// First index of the suit cards (after the Excuse and 21 trumps).
const FIRST_SUITED: usize = 1 + TRUMP_COUNT;

impl Card {
    /// Position of this card in the canonical order, 0..78.
    pub fn index(&self) -> usize {
        match self {
            Card::Excuse => 0,
            Card::Trump(t) => t.get() as usize,
            Card::Suited { suit, rank } => {
                FIRST_SUITED + suit.position() * SUIT_SIZE + rank.position()
            }
        }
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(index: usize) -> Option<Card> {
        match index {
            0 => Some(Card::Excuse),
            1..=TRUMP_COUNT => TrumpRank::new(index as u8).ok().map(Card::Trump),
            FIRST_SUITED..DECK_SIZE => {
                let offset = index - FIRST_SUITED;
                let suit = Suit::ALL[offset / SUIT_SIZE];
                let rank = SuitRank::ALL[offset % SUIT_SIZE];
                Some(Card::Suited { suit, rank })
            }
            _ => None,
        }
    }
}

/// Generate the full 78-card deck in canonical order.
pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE).filter_map(Card::from_index).collect()
}

/// True when `cards` holds each of the 78 cards exactly once.
pub fn is_permutation(cards: &[Card]) -> bool {
    if cards.len() != DECK_SIZE {
        return false;
    }
    let mut seen = [false; DECK_SIZE];
    for card in cards {
        let slot = &mut seen[card.index()];
        if *slot {
            return false;
        }
        *slot = true;
    }
    true
}

pub fn ensure_permutation(cards: &[Card]) -> Result<(), DomainError> {
    if is_permutation(cards) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidDeck,
            format!(
                "Expected a permutation of {DECK_SIZE} distinct cards, got {} cards",
                cards.len()
            ),
        ))
    }
}
