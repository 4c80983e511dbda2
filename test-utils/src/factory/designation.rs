//! Designated channel and role factories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, NotSet};

/// Designates a channel for a purpose such as `"ModerationLog"`.
pub async fn create_designated_channel(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
    designation: &str,
) -> Result<entity::designated_channel_mapping::Model, DbErr> {
    entity::designated_channel_mapping::ActiveModel {
        id: NotSet,
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
        designation: ActiveValue::Set(designation.to_string()),
        created_by_id: ActiveValue::Set("1".to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        deleted_by_id: ActiveValue::Set(None),
        deleted_at: ActiveValue::Set(None),
    }
    .insert(db)
    .await
}

/// Designates a role for a purpose such as `"Rank"`.
pub async fn create_designated_role(
    db: &DatabaseConnection,
    guild_id: &str,
    role_id: &str,
    designation: &str,
) -> Result<entity::designated_role_mapping::Model, DbErr> {
    entity::designated_role_mapping::ActiveModel {
        id: NotSet,
        guild_id: ActiveValue::Set(guild_id.to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
        designation: ActiveValue::Set(designation.to_string()),
        created_by_id: ActiveValue::Set("1".to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        deleted_by_id: ActiveValue::Set(None),
        deleted_at: ActiveValue::Set(None),
    }
    .insert(db)
    .await
}
