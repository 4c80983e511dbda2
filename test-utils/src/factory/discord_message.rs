//! Mirrored message factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a mirrored message with a unique id.
pub async fn create_discord_message(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
    author_id: &str,
    timestamp: DateTime<Utc>,
) -> Result<entity::discord_message::Model, DbErr> {
    entity::discord_message::ActiveModel {
        message_id: ActiveValue::Set(next_id().to_string()),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
        author_id: ActiveValue::Set(author_id.to_string()),
        timestamp: ActiveValue::Set(timestamp),
    }
    .insert(db)
    .await
}
