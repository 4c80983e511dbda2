use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModerationAction::Table)
                    .if_not_exists()
                    .col(pk_auto(ModerationAction::Id))
                    .col(string(ModerationAction::GuildId))
                    .col(string(ModerationAction::ActionType))
                    .col(string(ModerationAction::CreatedById))
                    .col(timestamp_with_time_zone(ModerationAction::CreatedAt))
                    .col(integer_null(ModerationAction::InfractionId))
                    .col(string_null(ModerationAction::DeletedMessageId))
                    .col(integer_null(ModerationAction::DeletedMessageBatchId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModerationAction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ModerationAction {
    Table,
    Id,
    GuildId,
    ActionType,
    CreatedById,
    CreatedAt,
    InfractionId,
    DeletedMessageId,
    DeletedMessageBatchId,
}
