use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscordUser::Table)
                    .if_not_exists()
                    .col(string(DiscordUser::DiscordId).primary_key())
                    .col(string(DiscordUser::Username))
                    .col(string_null(DiscordUser::GlobalName))
                    .col(string_null(DiscordUser::AvatarHash))
                    .col(boolean(DiscordUser::IsBot).default(false))
                    .col(timestamp_with_time_zone(DiscordUser::CreatedAt))
                    .col(timestamp_with_time_zone(DiscordUser::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscordUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DiscordUser {
    Table,
    DiscordId,
    Username,
    GlobalName,
    AvatarHash,
    IsBot,
    CreatedAt,
    UpdatedAt,
}
