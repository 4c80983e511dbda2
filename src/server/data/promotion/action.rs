use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

use crate::server::model::promotion::PromotionActionType;

pub struct PromotionActionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PromotionActionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a promotion action and returns its id.
    pub async fn create(
        &self,
        guild_id: u64,
        action_type: PromotionActionType,
        created_by_id: u64,
        campaign_id: Option<i32>,
        comment_id: Option<i32>,
    ) -> Result<i32, DbErr> {
        let entity = entity::promotion_action::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            action_type: ActiveValue::Set(action_type.as_ref().to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            campaign_id: ActiveValue::Set(campaign_id),
            comment_id: ActiveValue::Set(comment_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(entity.id)
    }
}
