//! Deterministic shuffle engine.

use super::cards_types::Card;
use super::deck::full_deck;

/// SplitMix64 generator.
///
/// Part of the frozen deal protocol: the constants, the rejection-sampling
/// range mapping and the Fisher-Yates loop below must never change.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `0..max`. `max` must be non-zero.
    pub fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Largest multiple of m that fits in u64; values >= limit are rejected
        // to avoid modulo bias.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next_u64();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using the deterministic generator.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SplitMix64::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// The canonical deck shuffled with `seed`.
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);
    deck
}
