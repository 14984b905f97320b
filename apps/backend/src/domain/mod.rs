//! Domain layer: the pure deal protocol and its reference data.

pub mod canonical;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod dealing;
pub mod hash_code;
pub mod identifiers;
pub mod reveal;
pub mod seed_derivation;
pub mod shuffle;

// Re-exports for ergonomics
pub use canonical::sort_hand;
pub use cards_types::{Card, Suit, SuitRank, TrumpRank};
pub use dealing::{deal, deal_cards_with_seed, Deal, DEAL_PROTOCOL_VERSION};
pub use hash_code::{hash_code, HashCode};
pub use identifiers::DealNumber;
pub use reveal::{reveal_state, GameStatus, RevealState};
