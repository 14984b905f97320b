//! Proptest strategies for deal inputs.

use proptest::prelude::*;
use tarot_backend::domain::deck::full_deck;
use tarot_backend::{Card, DealNumber, GameStatus};

/// Identifiers across the whole u64 range plus a tail of wider values.
pub fn deal_number() -> impl Strategy<Value = DealNumber> {
    prop_oneof![
        4 => any::<u64>().prop_map(DealNumber::from),
        1 => any::<u128>().prop_map(DealNumber::from),
        1 => "[1-9][0-9]{20,60}".prop_map(|s| DealNumber::parse(&s).expect("generated digits")),
    ]
}

/// A random permutation of the 78-card deck.
pub fn permutation() -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck()).prop_shuffle()
}

/// A random subset of the deck in random order.
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    (permutation(), 0usize..=78).prop_map(|(deck, n)| deck.into_iter().take(n).collect())
}

pub fn game_status() -> impl Strategy<Value = GameStatus> {
    proptest::sample::select(GameStatus::ALL.to_vec())
}
