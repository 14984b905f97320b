//! Game status reporting.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::GameStatus;
use crate::error::AppError;
use crate::repos::games::TarotGame;
use crate::services::games::GameService;
use crate::state::app_state::AppState;
use crate::web::timestamps::rfc3339;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResponse {
    pub id: i64,
    pub distribution_id: i64,
    pub status: GameStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TarotGame> for GameResponse {
    fn from(game: TarotGame) -> Self {
        Self {
            id: game.id,
            distribution_id: game.distribution_id,
            status: game.status,
            created_at: rfc3339(game.created_at),
            updated_at: rfc3339(game.updated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
}

/// PUT /api/games/{game_id}/status
async fn update_status(
    path: web::Path<i64>,
    body: web::Json<UpdateStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = path.into_inner();
    let status: GameStatus = body.into_inner().status.parse()?;

    let game = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(GameService::new().update_status(txn, game_id, status).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from(game)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{game_id}/status", web::put().to(update_status));
}
