//! SeaORM adapter for distribution repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::distributions;

pub mod dto;

pub use dto::DistributionCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<distributions::Model>, sea_orm::DbErr> {
    distributions::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_hash_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hash_code: &str,
) -> Result<Option<distributions::Model>, sea_orm::DbErr> {
    distributions::Entity::find()
        .filter(distributions::Column::HashCode.eq(hash_code))
        .one(conn)
        .await
}

pub async fn find_by_identifiers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    distribution_number: &str,
    sequence_number: &str,
) -> Result<Option<distributions::Model>, sea_orm::DbErr> {
    distributions::Entity::find()
        .filter(distributions::Column::DistributionNumber.eq(distribution_number))
        .filter(distributions::Column::SequenceNumber.eq(sequence_number))
        .one(conn)
        .await
}

/// Insert a distribution. Unique violations surface as DbErr and are
/// classified by `infra::db_errors`.
pub async fn create_distribution<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DistributionCreate,
) -> Result<distributions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = distributions::ActiveModel {
        id: NotSet,
        distribution_number: Set(dto.distribution_number),
        sequence_number: Set(dto.sequence_number),
        hash_code: Set(dto.hash_code),
        deck_order: Set(dto.deck_order),
        used_count: Set(0),
        created_at: Set(now),
    };

    active.insert(conn).await
}

/// Atomically add one to `used_count` in a single UPDATE statement.
pub async fn increment_used_count<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let result = distributions::Entity::update_many()
        .col_expr(
            distributions::Column::UsedCount,
            Expr::col(distributions::Column::UsedCount).add(1),
        )
        .filter(distributions::Column::Id.eq(id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!(
            "DISTRIBUTION_NOT_FOUND:{id}"
        )));
    }
    Ok(())
}
