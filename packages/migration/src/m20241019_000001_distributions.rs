use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Distributions {
    Table,
    Id,
    DistributionNumber,
    SequenceNumber,
    HashCode,
    DeckOrder,
    UsedCount,
    CreatedAt,
}

#[derive(Iden)]
enum TarotGames {
    Table,
    Id,
    DistributionId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // distributions table
        //
        // Identifiers are arbitrary-precision non-negative integers, stored as
        // canonical decimal text so no backend can truncate them.
        manager
            .create_table(
                Table::create()
                    .table(Distributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Distributions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Distributions::DistributionNumber)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Distributions::SequenceNumber)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Distributions::HashCode)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Distributions::DeckOrder).text().not_null())
                    .col(
                        ColumnDef::new(Distributions::UsedCount)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Distributions::UsedCount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Distributions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_distributions_identifiers")
                    .table(Distributions::Table)
                    .col(Distributions::DistributionNumber)
                    .col(Distributions::SequenceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_distributions_hash_code")
                    .table(Distributions::Table)
                    .col(Distributions::HashCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // tarot_games table: the slice of the table service's game records
        // that the reveal gate reads. Status is stored as TEXT on every backend.
        manager
            .create_table(
                Table::create()
                    .table(TarotGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TarotGames::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(TarotGames::DistributionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TarotGames::Status)
                            .string_len(16)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(
                        ColumnDef::new(TarotGames::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TarotGames::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tarot_games_distribution_id")
                            .from(TarotGames::Table, TarotGames::DistributionId)
                            .to(Distributions::Table, Distributions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_tarot_games_distribution_status")
                    .table(TarotGames::Table)
                    .col(TarotGames::DistributionId)
                    .col(TarotGames::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_tarot_games_distribution_status")
                    .table(TarotGames::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TarotGames::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_distributions_hash_code")
                    .table(Distributions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_distributions_identifiers")
                    .table(Distributions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Distributions::Table).to_owned())
            .await?;

        Ok(())
    }
}
