use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeletedMessageBatch::Table)
                    .if_not_exists()
                    .col(pk_auto(DeletedMessageBatch::Id))
                    .col(string(DeletedMessageBatch::GuildId))
                    .col(string(DeletedMessageBatch::ChannelId))
                    .col(string(DeletedMessageBatch::CreatedById))
                    .col(timestamp_with_time_zone(DeletedMessageBatch::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeletedMessageBatch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DeletedMessageBatch {
    Table,
    Id,
    GuildId,
    ChannelId,
    CreatedById,
    CreatedAt,
}
