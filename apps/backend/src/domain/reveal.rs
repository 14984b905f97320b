//! Reveal gate: decides whether a distribution's cards may be shown.
//!
//! A deal stays sealed while every game using it is still in progress and
//! becomes revealed once any of them reaches a terminal status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// Lifecycle status of a game referencing a distribution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Waiting,
    Dealing,
    Bidding,
    Dog,
    Playing,
    Scoring,
    End,
}

impl GameStatus {
    pub const ALL: [GameStatus; 7] = [
        GameStatus::Waiting,
        GameStatus::Dealing,
        GameStatus::Bidding,
        GameStatus::Dog,
        GameStatus::Playing,
        GameStatus::Scoring,
        GameStatus::End,
    ];

    /// SCORING and END unlock the reveal.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Scoring | GameStatus::End)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::Waiting => "WAITING",
            GameStatus::Dealing => "DEALING",
            GameStatus::Bidding => "BIDDING",
            GameStatus::Dog => "DOG",
            GameStatus::Playing => "PLAYING",
            GameStatus::Scoring => "SCORING",
            GameStatus::End => "END",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation_other(format!("Unknown game status: {s}"))
            })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevealState {
    Sealed,
    Revealed,
}

impl RevealState {
    pub const fn can_view_details(self) -> bool {
        matches!(self, RevealState::Revealed)
    }

    /// Gate from the number of referencing games in a terminal status.
    pub const fn from_terminal_count(terminal_games: u64) -> Self {
        if terminal_games > 0 {
            RevealState::Revealed
        } else {
            RevealState::Sealed
        }
    }
}

/// Gate from the statuses of all games referencing a distribution.
pub fn reveal_state<I>(statuses: I) -> RevealState
where
    I: IntoIterator<Item = GameStatus>,
{
    if statuses.into_iter().any(GameStatus::is_terminal) {
        RevealState::Revealed
    } else {
        RevealState::Sealed
    }
}
