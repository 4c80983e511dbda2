use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClaimMapping::Table)
                    .if_not_exists()
                    .col(pk_auto(ClaimMapping::Id))
                    .col(string(ClaimMapping::GuildId))
                    .col(string(ClaimMapping::MappingType))
                    .col(string_null(ClaimMapping::RoleId))
                    .col(string_null(ClaimMapping::UserId))
                    .col(string(ClaimMapping::Claim))
                    .col(string(ClaimMapping::CreatedById))
                    .col(timestamp_with_time_zone(ClaimMapping::CreatedAt))
                    .col(string_null(ClaimMapping::RescindedById))
                    .col(timestamp_with_time_zone_null(ClaimMapping::RescindedAt))
                    .check(
                        Expr::col(ClaimMapping::RoleId)
                            .is_null()
                            .ne(Expr::col(ClaimMapping::UserId).is_null()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClaimMapping::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClaimMapping {
    Table,
    Id,
    GuildId,
    MappingType,
    RoleId,
    UserId,
    Claim,
    CreatedById,
    CreatedAt,
    RescindedById,
    RescindedAt,
}
