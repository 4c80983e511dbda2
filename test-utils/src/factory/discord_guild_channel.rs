//! Discord guild channel factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a text channel with a unique id in the guild.
pub async fn create_guild_channel(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::discord_guild_channel::Model, DbErr> {
    create_guild_channel_with_id(db, guild_id, &next_id().to_string()).await
}

/// Creates a text channel with a specific id in the guild.
pub async fn create_guild_channel_with_id(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
) -> Result<entity::discord_guild_channel::Model, DbErr> {
    entity::discord_guild_channel::ActiveModel {
        channel_id: ActiveValue::Set(channel_id.to_string()),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        name: ActiveValue::Set(format!("channel-{}", channel_id)),
        kind: ActiveValue::Set("text".to_string()),
        position: ActiveValue::Set(0),
        parent_id: ActiveValue::Set(None),
    }
    .insert(db)
    .await
}
