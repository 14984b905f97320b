//! SeaORM adapter for the games read model - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::tarot_games::{self, TarotGameStatus};

pub mod dto;

pub use dto::TarotGameCreate;

const TERMINAL: [TarotGameStatus; 2] = [TarotGameStatus::Scoring, TarotGameStatus::End];

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<tarot_games::Model>, sea_orm::DbErr> {
    tarot_games::Entity::find_by_id(game_id).one(conn).await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TarotGameCreate,
) -> Result<tarot_games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = tarot_games::ActiveModel {
        id: NotSet,
        distribution_id: Set(dto.distribution_id),
        status: Set(dto.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

/// Set a game's status, then refetch.
///
/// A move to an in-progress status only matches rows that are not already
/// SCORING or END, so a finished game stays finished even when another
/// writer got there between read and write.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    status: TarotGameStatus,
) -> Result<tarot_games::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();
    let mut update = tarot_games::Entity::update_many()
        .col_expr(tarot_games::Column::Status, Expr::val(status).into())
        .col_expr(tarot_games::Column::UpdatedAt, Expr::val(now).into())
        .filter(tarot_games::Column::Id.eq(game_id));
    if !TERMINAL.contains(&status) {
        update = update.filter(tarot_games::Column::Status.is_not_in(TERMINAL));
    }
    let result = update.exec(conn).await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, game_id).await? {
            Some(_) => Err(sea_orm::DbErr::Custom(format!("GAME_FINISHED:{game_id}"))),
            None => Err(sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{game_id}"))),
        };
    }

    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{game_id}")))
}

/// Number of referencing games in SCORING or END.
pub async fn count_terminal_for_distribution<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    tarot_games::Entity::find()
        .filter(tarot_games::Column::DistributionId.eq(distribution_id))
        .filter(tarot_games::Column::Status.is_in(TERMINAL))
        .count(conn)
        .await
}
