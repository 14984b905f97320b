//! Adapters for external dependencies.

pub mod distributions_sea;
pub mod tarot_games_sea;
