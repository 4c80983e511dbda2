use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000001_create_discord_user_table::DiscordUser;
use super::m20250601_000002_create_discord_guild_table::DiscordGuild;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildUser::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildUser::Id))
                    .col(string(GuildUser::GuildId))
                    .col(string(GuildUser::UserId))
                    .col(string_null(GuildUser::Nickname))
                    .col(timestamp_with_time_zone(GuildUser::FirstSeen))
                    .col(timestamp_with_time_zone(GuildUser::LastSeen))
                    .col(boolean(GuildUser::IsMember).default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guild_user_guild_id")
                            .from(GuildUser::Table, GuildUser::GuildId)
                            .to(DiscordGuild::Table, DiscordGuild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guild_user_user_id")
                            .from(GuildUser::Table, GuildUser::UserId)
                            .to(DiscordUser::Table, DiscordUser::DiscordId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_guild_user_unique")
                            .col(GuildUser::GuildId)
                            .col(GuildUser::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildUser {
    Table,
    Id,
    GuildId,
    UserId,
    Nickname,
    FirstSeen,
    LastSeen,
    IsMember,
}
