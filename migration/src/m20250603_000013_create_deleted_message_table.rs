use sea_orm_migration::{prelude::*, schema::*};

use super::m20250603_000012_create_deleted_message_batch_table::DeletedMessageBatch;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeletedMessage::Table)
                    .if_not_exists()
                    .col(string(DeletedMessage::MessageId).primary_key())
                    .col(string(DeletedMessage::GuildId))
                    .col(string(DeletedMessage::ChannelId))
                    .col(string(DeletedMessage::AuthorId))
                    .col(text(DeletedMessage::Content))
                    .col(text(DeletedMessage::Reason))
                    .col(string(DeletedMessage::CreatedById))
                    .col(timestamp_with_time_zone(DeletedMessage::CreatedAt))
                    .col(integer_null(DeletedMessage::BatchId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deleted_message_batch_id")
                            .from(DeletedMessage::Table, DeletedMessage::BatchId)
                            .to(DeletedMessageBatch::Table, DeletedMessageBatch::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeletedMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DeletedMessage {
    Table,
    MessageId,
    GuildId,
    ChannelId,
    AuthorId,
    Content,
    Reason,
    CreatedById,
    CreatedAt,
    BatchId,
}
