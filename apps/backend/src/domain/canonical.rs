//! Hand canonicalization.

use super::cards_types::Card;

/// Sort a hand into canonical deck order: Excuse, trumps ascending, then
/// Spades, Hearts, Diamonds, Clubs from 1 to King.
pub fn sort_hand(hand: &[Card]) -> Vec<Card> {
    let mut sorted = hand.to_vec();
    sorted.sort_unstable();
    sorted
}
