use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DesignatedChannelMapping::Table)
                    .if_not_exists()
                    .col(pk_auto(DesignatedChannelMapping::Id))
                    .col(string(DesignatedChannelMapping::GuildId))
                    .col(string(DesignatedChannelMapping::ChannelId))
                    .col(string(DesignatedChannelMapping::Designation))
                    .col(string(DesignatedChannelMapping::CreatedById))
                    .col(timestamp_with_time_zone(DesignatedChannelMapping::CreatedAt))
                    .col(string_null(DesignatedChannelMapping::DeletedById))
                    .col(timestamp_with_time_zone_null(DesignatedChannelMapping::DeletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DesignatedChannelMapping::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DesignatedChannelMapping {
    Table,
    Id,
    GuildId,
    ChannelId,
    Designation,
    CreatedById,
    CreatedAt,
    DeletedById,
    DeletedAt,
}
