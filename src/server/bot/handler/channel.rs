//! Channel event handlers.
//!
//! All guild channels are mirrored, categories included, so designations and
//! message counts can show channel names.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildChannel, Message};

use crate::server::service::discord::DiscordGuildChannelService;

pub async fn handle_channel_create(db: &DatabaseConnection, _ctx: Context, channel: GuildChannel) {
    let guild_id = channel.guild_id.get();

    if let Err(e) = DiscordGuildChannelService::new(db).upsert(&channel).await {
        tracing::error!(
            "Failed to upsert new channel {} in guild {}: {}",
            channel.name,
            guild_id,
            e
        );
    } else {
        tracing::debug!("Created channel {} in guild {}", channel.name, guild_id);
    }
}

pub async fn handle_channel_update(
    db: &DatabaseConnection,
    _ctx: Context,
    _old: Option<GuildChannel>,
    new: GuildChannel,
) {
    let guild_id = new.guild_id.get();

    if let Err(e) = DiscordGuildChannelService::new(db).upsert(&new).await {
        tracing::error!(
            "Failed to upsert updated channel {} in guild {}: {}",
            new.name,
            guild_id,
            e
        );
    } else {
        tracing::debug!("Updated channel {} in guild {}", new.name, guild_id);
    }
}

pub async fn handle_channel_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let guild_id = channel.guild_id.get();
    let channel_id = channel.id.get();

    if let Err(e) = DiscordGuildChannelService::new(db).delete(channel_id).await {
        tracing::error!(
            "Failed to delete channel {} from guild {}: {}",
            channel_id,
            guild_id,
            e
        );
    } else {
        tracing::debug!("Deleted channel {} from guild {}", channel_id, guild_id);
    }
}
