use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromotionAction::Table)
                    .if_not_exists()
                    .col(pk_auto(PromotionAction::Id))
                    .col(string(PromotionAction::GuildId))
                    .col(string(PromotionAction::ActionType))
                    .col(string(PromotionAction::CreatedById))
                    .col(timestamp_with_time_zone(PromotionAction::CreatedAt))
                    .col(integer_null(PromotionAction::CampaignId))
                    .col(integer_null(PromotionAction::CommentId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromotionAction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PromotionAction {
    Table,
    Id,
    GuildId,
    ActionType,
    CreatedById,
    CreatedAt,
    CampaignId,
    CommentId,
}
