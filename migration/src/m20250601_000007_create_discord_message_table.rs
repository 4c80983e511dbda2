use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscordMessage::Table)
                    .if_not_exists()
                    .col(string(DiscordMessage::MessageId).primary_key())
                    .col(string(DiscordMessage::GuildId))
                    .col(string(DiscordMessage::ChannelId))
                    .col(string(DiscordMessage::AuthorId))
                    .col(timestamp_with_time_zone(DiscordMessage::Timestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_discord_message_author_timestamp")
                    .table(DiscordMessage::Table)
                    .col(DiscordMessage::GuildId)
                    .col(DiscordMessage::AuthorId)
                    .col(DiscordMessage::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscordMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DiscordMessage {
    Table,
    MessageId,
    GuildId,
    ChannelId,
    AuthorId,
    Timestamp,
}
