//! Repository functions for the games read model.

use sea_orm::ConnectionTrait;

use crate::adapters::tarot_games_sea as games_adapter;
use crate::domain::GameStatus;
use crate::entities::tarot_games;
use crate::errors::domain::{DomainError, NotFoundKind};

/// A game referencing a distribution, as far as the reveal gate cares.
#[derive(Debug, Clone, PartialEq)]
pub struct TarotGame {
    pub id: i64,
    pub distribution_id: i64,
    pub status: GameStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl From<tarot_games::Model> for TarotGame {
    fn from(model: tarot_games::Model) -> Self {
        Self {
            id: model.id,
            distribution_id: model.distribution_id,
            status: model.status.into(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<TarotGame>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(TarotGame::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<TarotGame, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_id: i64,
    status: GameStatus,
) -> Result<TarotGame, DomainError> {
    let dto = games_adapter::TarotGameCreate::new(distribution_id).with_status(status.into());
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(TarotGame::from(game))
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    status: GameStatus,
) -> Result<TarotGame, DomainError> {
    let game = games_adapter::update_status(conn, game_id, status.into()).await?;
    Ok(TarotGame::from(game))
}

/// Number of referencing games in a terminal status.
pub async fn count_terminal_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_id: i64,
) -> Result<u64, DomainError> {
    Ok(games_adapter::count_terminal_for_distribution(conn, distribution_id).await?)
}
