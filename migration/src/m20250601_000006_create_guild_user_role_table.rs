use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000003_create_discord_guild_role_table::DiscordGuildRole;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildUserRole::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildUserRole::Id))
                    .col(string(GuildUserRole::GuildId))
                    .col(string(GuildUserRole::UserId))
                    .col(string(GuildUserRole::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guild_user_role_role_id")
                            .from(GuildUserRole::Table, GuildUserRole::RoleId)
                            .to(DiscordGuildRole::Table, DiscordGuildRole::RoleId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_guild_user_role_unique")
                            .col(GuildUserRole::GuildId)
                            .col(GuildUserRole::UserId)
                            .col(GuildUserRole::RoleId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildUserRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildUserRole {
    Table,
    Id,
    GuildId,
    UserId,
    RoleId,
}
