use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::{model::promotion::CampaignOutcome, server::model::promotion::PromotionCampaign};

pub struct PromotionCampaignRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PromotionCampaignRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        guild_id: u64,
        subject_id: u64,
        target_role_id: u64,
        created_by_id: u64,
    ) -> Result<PromotionCampaign, DbErr> {
        let entity = entity::promotion_campaign::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            subject_id: ActiveValue::Set(subject_id.to_string()),
            target_role_id: ActiveValue::Set(target_role_id.to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            outcome: ActiveValue::Set(None),
            closed_by_id: ActiveValue::Set(None),
            closed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        PromotionCampaign::from_entity(entity)
    }

    pub async fn find_by_id(
        &self,
        guild_id: u64,
        id: i32,
    ) -> Result<Option<PromotionCampaign>, DbErr> {
        entity::prelude::PromotionCampaign::find_by_id(id)
            .filter(entity::promotion_campaign::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(PromotionCampaign::from_entity)
            .transpose()
    }

    /// Finds the subject's open campaign, if any.
    pub async fn find_open_for_subject(
        &self,
        guild_id: u64,
        subject_id: u64,
    ) -> Result<Option<PromotionCampaign>, DbErr> {
        entity::prelude::PromotionCampaign::find()
            .filter(entity::promotion_campaign::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::promotion_campaign::Column::SubjectId.eq(subject_id.to_string()))
            .filter(entity::promotion_campaign::Column::Outcome.is_null())
            .one(self.db)
            .await?
            .map(PromotionCampaign::from_entity)
            .transpose()
    }

    /// Finds the most recently closed rejected campaign for the subject and role.
    pub async fn find_latest_rejected(
        &self,
        guild_id: u64,
        subject_id: u64,
        target_role_id: u64,
    ) -> Result<Option<PromotionCampaign>, DbErr> {
        entity::prelude::PromotionCampaign::find()
            .filter(entity::promotion_campaign::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::promotion_campaign::Column::SubjectId.eq(subject_id.to_string()))
            .filter(
                entity::promotion_campaign::Column::TargetRoleId.eq(target_role_id.to_string()),
            )
            .filter(
                entity::promotion_campaign::Column::Outcome.eq(CampaignOutcome::Rejected.as_ref()),
            )
            .order_by_desc(entity::promotion_campaign::Column::ClosedAt)
            .order_by_desc(entity::promotion_campaign::Column::Id)
            .one(self.db)
            .await?
            .map(PromotionCampaign::from_entity)
            .transpose()
    }

    /// Gets the guild's campaigns, newest first.
    ///
    /// `open` restricts results to open (`Some(true)`) or closed (`Some(false)`)
    /// campaigns.
    pub async fn get_by_guild(
        &self,
        guild_id: u64,
        open: Option<bool>,
    ) -> Result<Vec<PromotionCampaign>, DbErr> {
        let mut query = entity::prelude::PromotionCampaign::find()
            .filter(entity::promotion_campaign::Column::GuildId.eq(guild_id.to_string()));

        match open {
            Some(true) => {
                query = query.filter(entity::promotion_campaign::Column::Outcome.is_null())
            }
            Some(false) => {
                query = query.filter(entity::promotion_campaign::Column::Outcome.is_not_null())
            }
            None => {}
        }

        query
            .order_by_desc(entity::promotion_campaign::Column::CreatedAt)
            .order_by_desc(entity::promotion_campaign::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(PromotionCampaign::from_entity)
            .collect()
    }

    /// Closes the campaign with the given outcome if it is still open.
    ///
    /// Returns `None` when it was already closed, so only one of two
    /// concurrent closes goes through.
    pub async fn close(
        &self,
        id: i32,
        outcome: CampaignOutcome,
        closed_by_id: u64,
    ) -> Result<Option<PromotionCampaign>, DbErr> {
        let result = entity::prelude::PromotionCampaign::update_many()
            .col_expr(
                entity::promotion_campaign::Column::Outcome,
                Expr::value(outcome.as_ref()),
            )
            .col_expr(
                entity::promotion_campaign::Column::ClosedById,
                Expr::value(closed_by_id.to_string()),
            )
            .col_expr(
                entity::promotion_campaign::Column::ClosedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::promotion_campaign::Column::Id.eq(id))
            .filter(entity::promotion_campaign::Column::Outcome.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_entity(id).await.map(Some)
    }

    /// Replaces the outcome of a campaign that has already been closed.
    pub async fn set_outcome(
        &self,
        id: i32,
        outcome: CampaignOutcome,
    ) -> Result<PromotionCampaign, DbErr> {
        let existing = entity::prelude::PromotionCampaign::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("promotion campaign {}", id)))?;

        let mut active: entity::promotion_campaign::ActiveModel = existing.into();
        active.outcome = ActiveValue::Set(Some(outcome.as_ref().to_string()));

        PromotionCampaign::from_entity(active.update(self.db).await?)
    }

    async fn find_entity(&self, id: i32) -> Result<PromotionCampaign, DbErr> {
        entity::prelude::PromotionCampaign::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("promotion campaign {}", id)))
            .and_then(PromotionCampaign::from_entity)
    }
}
