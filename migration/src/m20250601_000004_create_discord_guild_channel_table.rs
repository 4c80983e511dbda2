use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000002_create_discord_guild_table::DiscordGuild;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscordGuildChannel::Table)
                    .if_not_exists()
                    .col(string(DiscordGuildChannel::ChannelId).primary_key())
                    .col(string(DiscordGuildChannel::GuildId))
                    .col(string(DiscordGuildChannel::Name))
                    .col(string(DiscordGuildChannel::Kind))
                    .col(integer(DiscordGuildChannel::Position))
                    .col(string_null(DiscordGuildChannel::ParentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discord_guild_channel_guild_id")
                            .from(DiscordGuildChannel::Table, DiscordGuildChannel::GuildId)
                            .to(DiscordGuild::Table, DiscordGuild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscordGuildChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DiscordGuildChannel {
    Table,
    ChannelId,
    GuildId,
    Name,
    Kind,
    Position,
    ParentId,
}
