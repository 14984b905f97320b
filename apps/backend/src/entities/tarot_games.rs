use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TarotGameStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "DEALING")]
    Dealing,
    #[sea_orm(string_value = "BIDDING")]
    Bidding,
    #[sea_orm(string_value = "DOG")]
    Dog,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "SCORING")]
    Scoring,
    #[sea_orm(string_value = "END")]
    End,
}

impl From<TarotGameStatus> for GameStatus {
    fn from(s: TarotGameStatus) -> Self {
        match s {
            TarotGameStatus::Waiting => GameStatus::Waiting,
            TarotGameStatus::Dealing => GameStatus::Dealing,
            TarotGameStatus::Bidding => GameStatus::Bidding,
            TarotGameStatus::Dog => GameStatus::Dog,
            TarotGameStatus::Playing => GameStatus::Playing,
            TarotGameStatus::Scoring => GameStatus::Scoring,
            TarotGameStatus::End => GameStatus::End,
        }
    }
}

impl From<GameStatus> for TarotGameStatus {
    fn from(s: GameStatus) -> Self {
        match s {
            GameStatus::Waiting => TarotGameStatus::Waiting,
            GameStatus::Dealing => TarotGameStatus::Dealing,
            GameStatus::Bidding => TarotGameStatus::Bidding,
            GameStatus::Dog => TarotGameStatus::Dog,
            GameStatus::Playing => TarotGameStatus::Playing,
            GameStatus::Scoring => TarotGameStatus::Scoring,
            GameStatus::End => TarotGameStatus::End,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tarot_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "distribution_id")]
    pub distribution_id: i64,
    pub status: TarotGameStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::distributions::Entity",
        from = "Column::DistributionId",
        to = "super::distributions::Column::Id"
    )]
    Distribution,
}

impl Related<super::distributions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Distribution.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
