use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "distributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "distribution_number", column_type = "Text")]
    pub distribution_number: String,
    #[sea_orm(column_name = "sequence_number", column_type = "Text")]
    pub sequence_number: String,
    #[sea_orm(column_name = "hash_code", column_type = "String(StringLen::N(10))")]
    pub hash_code: String,
    /// JSON array of 78 card tokens
    #[sea_orm(column_name = "deck_order", column_type = "Text")]
    pub deck_order: String,
    #[sea_orm(column_name = "used_count")]
    pub used_count: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tarot_games::Entity")]
    TarotGames,
}

impl Related<super::tarot_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TarotGames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
