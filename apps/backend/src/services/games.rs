//! Hooks for the table service to register games against distributions and
//! report their progress. The reveal gate reads what is recorded here.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::{GameStatus, HashCode};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::distributions as distributions_repo;
use crate::repos::games::{self as games_repo, TarotGame};

/// Game lifecycle service.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Register a new game on the distribution behind `code` and count the usage.
    ///
    /// Both writes belong in one transaction; callers pass the transaction.
    pub async fn start_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        code: &str,
    ) -> Result<TarotGame, DomainError> {
        let code = HashCode::parse(code)?;
        let distribution = distributions_repo::require_by_hash_code(conn, &code).await?;
        let game = games_repo::create_game(conn, distribution.id, GameStatus::Waiting).await?;
        distributions_repo::increment_used_count(conn, distribution.id).await?;

        info!(game_id = game.id, distribution_id = distribution.id, hash_code = %code, "Game started");
        Ok(game)
    }

    /// Move a game to a new status.
    ///
    /// Terminal games (SCORING, END) never return to an in-progress status,
    /// which keeps the reveal of their distribution permanent. SCORING may
    /// still advance to END.
    pub async fn update_status<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        status: GameStatus,
    ) -> Result<TarotGame, DomainError> {
        let current = games_repo::require_game(conn, game_id).await?;
        if current.status.is_terminal() && !status.is_terminal() {
            return Err(DomainError::conflict(
                ConflictKind::GameFinished,
                format!(
                    "Game {game_id} is {} and cannot move back to {status}",
                    current.status
                ),
            ));
        }

        let game = games_repo::update_status(conn, game_id, status).await?;
        info!(game_id, from = %current.status, to = %status, "Game status updated");
        Ok(game)
    }
}
