use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Infraction::Table)
                    .if_not_exists()
                    .col(pk_auto(Infraction::Id))
                    .col(string(Infraction::GuildId))
                    .col(string(Infraction::InfractionType))
                    .col(text(Infraction::Reason))
                    .col(big_integer_null(Infraction::DurationSecs))
                    .col(timestamp_with_time_zone_null(Infraction::ExpiresAt))
                    .col(string(Infraction::SubjectId))
                    .col(string(Infraction::CreatedById))
                    .col(timestamp_with_time_zone(Infraction::CreatedAt))
                    .col(string_null(Infraction::RescindedById))
                    .col(timestamp_with_time_zone_null(Infraction::RescindedAt))
                    .col(text_null(Infraction::RescindReason))
                    .col(string_null(Infraction::DeletedById))
                    .col(timestamp_with_time_zone_null(Infraction::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_infraction_guild_subject")
                    .table(Infraction::Table)
                    .col(Infraction::GuildId)
                    .col(Infraction::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_infraction_expires_at")
                    .table(Infraction::Table)
                    .col(Infraction::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        // At most one active mute and one active ban per subject
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_infraction_active_unique \
                 ON infraction (guild_id, subject_id, infraction_type) \
                 WHERE rescinded_at IS NULL AND deleted_at IS NULL \
                 AND infraction_type IN ('Mute', 'Ban')",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Infraction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Infraction {
    Table,
    Id,
    GuildId,
    InfractionType,
    Reason,
    DurationSecs,
    ExpiresAt,
    SubjectId,
    CreatedById,
    CreatedAt,
    RescindedById,
    RescindedAt,
    RescindReason,
    DeletedById,
    DeletedAt,
}
