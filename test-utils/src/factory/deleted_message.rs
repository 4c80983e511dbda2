//! Deleted message factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Records a deleted message with a unique id, optionally part of a batch.
pub async fn create_deleted_message(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
    author_id: &str,
    content: &str,
    batch_id: Option<i32>,
) -> Result<entity::deleted_message::Model, DbErr> {
    entity::deleted_message::ActiveModel {
        message_id: ActiveValue::Set(next_id().to_string()),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
        author_id: ActiveValue::Set(author_id.to_string()),
        content: ActiveValue::Set(content.to_string()),
        reason: ActiveValue::Set("Test deletion".to_string()),
        created_by_id: ActiveValue::Set("1".to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        batch_id: ActiveValue::Set(batch_id),
    }
    .insert(db)
    .await
}
