//! Moderation audit trail.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    model::infraction::{ModerationActionParam, ModerationActionType},
    util::parse::parse_enum,
};

pub struct ModerationActionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ModerationActionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records an action and returns its id.
    pub async fn create(
        &self,
        action_type: ModerationActionType,
        param: ModerationActionParam,
    ) -> Result<i32, DbErr> {
        let entity = entity::moderation_action::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            action_type: ActiveValue::Set(action_type.as_ref().to_string()),
            created_by_id: ActiveValue::Set(param.created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            infraction_id: ActiveValue::Set(param.infraction_id),
            deleted_message_id: ActiveValue::Set(
                param.deleted_message_id.map(|id| id.to_string()),
            ),
            deleted_message_batch_id: ActiveValue::Set(param.deleted_message_batch_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(entity.id)
    }

    /// Gets the actions recorded against an infraction, oldest first.
    pub async fn get_types_for_infraction(
        &self,
        infraction_id: i32,
    ) -> Result<Vec<ModerationActionType>, DbErr> {
        entity::prelude::ModerationAction::find()
            .filter(entity::moderation_action::Column::InfractionId.eq(infraction_id))
            .order_by_asc(entity::moderation_action::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(|action| parse_enum(&action.action_type, "action_type"))
            .collect()
    }
}
