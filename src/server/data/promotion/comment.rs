use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{model::promotion::PromotionSentiment, server::model::promotion::PromotionComment};

pub struct PromotionCommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PromotionCommentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        campaign_id: i32,
        sentiment: PromotionSentiment,
        content: &str,
        created_by_id: u64,
    ) -> Result<PromotionComment, DbErr> {
        let entity = entity::promotion_comment::ActiveModel {
            campaign_id: ActiveValue::Set(campaign_id),
            sentiment: ActiveValue::Set(sentiment.as_ref().to_string()),
            content: ActiveValue::Set(content.to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            modified_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        PromotionComment::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<PromotionComment>, DbErr> {
        entity::prelude::PromotionComment::find_by_id(id)
            .one(self.db)
            .await?
            .map(PromotionComment::from_entity)
            .transpose()
    }

    pub async fn find_by_author(
        &self,
        campaign_id: i32,
        author_id: u64,
    ) -> Result<Option<PromotionComment>, DbErr> {
        entity::prelude::PromotionComment::find()
            .filter(entity::promotion_comment::Column::CampaignId.eq(campaign_id))
            .filter(entity::promotion_comment::Column::CreatedById.eq(author_id.to_string()))
            .one(self.db)
            .await?
            .map(PromotionComment::from_entity)
            .transpose()
    }

    /// Replaces a comment's sentiment and content and stamps `modified_at`.
    pub async fn update(
        &self,
        id: i32,
        sentiment: PromotionSentiment,
        content: &str,
    ) -> Result<PromotionComment, DbErr> {
        let existing = entity::prelude::PromotionComment::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("promotion comment {}", id)))?;

        let mut active: entity::promotion_comment::ActiveModel = existing.into();
        active.sentiment = ActiveValue::Set(sentiment.as_ref().to_string());
        active.content = ActiveValue::Set(content.to_string());
        active.modified_at = ActiveValue::Set(Some(Utc::now()));

        PromotionComment::from_entity(active.update(self.db).await?)
    }

    /// Gets a campaign's comments, oldest first.
    pub async fn get_by_campaign(&self, campaign_id: i32) -> Result<Vec<PromotionComment>, DbErr> {
        self.get_by_campaigns(&[campaign_id]).await
    }

    pub async fn get_by_campaigns(
        &self,
        campaign_ids: &[i32],
    ) -> Result<Vec<PromotionComment>, DbErr> {
        if campaign_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::PromotionComment::find()
            .filter(entity::promotion_comment::Column::CampaignId.is_in(campaign_ids.to_vec()))
            .order_by_asc(entity::promotion_comment::Column::CreatedAt)
            .order_by_asc(entity::promotion_comment::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(PromotionComment::from_entity)
            .collect()
    }
}
