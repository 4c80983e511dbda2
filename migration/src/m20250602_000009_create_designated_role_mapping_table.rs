use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DesignatedRoleMapping::Table)
                    .if_not_exists()
                    .col(pk_auto(DesignatedRoleMapping::Id))
                    .col(string(DesignatedRoleMapping::GuildId))
                    .col(string(DesignatedRoleMapping::RoleId))
                    .col(string(DesignatedRoleMapping::Designation))
                    .col(string(DesignatedRoleMapping::CreatedById))
                    .col(timestamp_with_time_zone(DesignatedRoleMapping::CreatedAt))
                    .col(string_null(DesignatedRoleMapping::DeletedById))
                    .col(timestamp_with_time_zone_null(DesignatedRoleMapping::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DesignatedRoleMapping::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DesignatedRoleMapping {
    Table,
    Id,
    GuildId,
    RoleId,
    Designation,
    CreatedById,
    CreatedAt,
    DeletedById,
    DeletedAt,
}
