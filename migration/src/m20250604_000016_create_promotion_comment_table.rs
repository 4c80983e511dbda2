use sea_orm_migration::{prelude::*, schema::*};

use super::m20250604_000015_create_promotion_campaign_table::PromotionCampaign;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PromotionComment::Table)
                    .if_not_exists()
                    .col(pk_auto(PromotionComment::Id))
                    .col(integer(PromotionComment::CampaignId))
                    .col(string(PromotionComment::Sentiment))
                    .col(text(PromotionComment::Content))
                    .col(string(PromotionComment::CreatedById))
                    .col(timestamp_with_time_zone(PromotionComment::CreatedAt))
                    .col(timestamp_with_time_zone_null(PromotionComment::ModifiedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promotion_comment_campaign_id")
                            .from(PromotionComment::Table, PromotionComment::CampaignId)
                            .to(PromotionCampaign::Table, PromotionCampaign::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_promotion_comment_author_unique")
                            .col(PromotionComment::CampaignId)
                            .col(PromotionComment::CreatedById),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromotionComment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PromotionComment {
    Table,
    Id,
    CampaignId,
    Sentiment,
    Content,
    CreatedById,
    CreatedAt,
    ModifiedAt,
}
