use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromotionCampaign::Table)
                    .if_not_exists()
                    .col(pk_auto(PromotionCampaign::Id))
                    .col(string(PromotionCampaign::GuildId))
                    .col(string(PromotionCampaign::SubjectId))
                    .col(string(PromotionCampaign::TargetRoleId))
                    .col(string(PromotionCampaign::CreatedById))
                    .col(timestamp_with_time_zone(PromotionCampaign::CreatedAt))
                    .col(string_null(PromotionCampaign::Outcome))
                    .col(string_null(PromotionCampaign::ClosedById))
                    .col(timestamp_with_time_zone_null(PromotionCampaign::ClosedAt))
                    .to_owned(),
            )
            .await?;

        // One open campaign per subject. Partial indexes aren't expressible
        // through the index builder, and both Postgres and SQLite accept this.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_promotion_campaign_open_unique \
                 ON promotion_campaign (guild_id, subject_id) WHERE outcome IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromotionCampaign::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PromotionCampaign {
    Table,
    Id,
    GuildId,
    SubjectId,
    TargetRoleId,
    CreatedById,
    CreatedAt,
    Outcome,
    ClosedById,
    ClosedAt,
}
