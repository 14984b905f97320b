//! DTOs for tarot_games_sea adapter.

use crate::entities::tarot_games::TarotGameStatus;

/// DTO for registering a game that uses a distribution.
#[derive(Debug, Clone)]
pub struct TarotGameCreate {
    pub distribution_id: i64,
    pub status: TarotGameStatus,
}

impl TarotGameCreate {
    pub fn new(distribution_id: i64) -> Self {
        Self {
            distribution_id,
            status: TarotGameStatus::Waiting,
        }
    }

    pub fn with_status(mut self, status: TarotGameStatus) -> Self {
        self.status = status;
        self
    }
}
