use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, GuildChannel};
use std::collections::HashMap;

use crate::server::{
    data::discord::DiscordGuildChannelRepository, error::AppError,
    model::discord::DiscordGuildChannel,
};

pub struct DiscordGuildChannelService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordGuildChannelService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the mirrored channels of a guild with the given set.
    ///
    /// Every channel kind is kept so categories and voice channels can carry
    /// mute role overwrites and designations.
    pub async fn update_channels(
        &self,
        guild_id: u64,
        guild_channels: &HashMap<ChannelId, GuildChannel>,
    ) -> Result<(), AppError> {
        let channel_repo = DiscordGuildChannelRepository::new(self.db);

        channel_repo
            .sync_guild_channels(guild_id, guild_channels)
            .await?;

        tracing::debug!(
            "Updated {} channels for guild {}",
            guild_channels.len(),
            guild_id
        );

        Ok(())
    }

    pub async fn upsert(&self, channel: &GuildChannel) -> Result<DiscordGuildChannel, AppError> {
        let channel_repo = DiscordGuildChannelRepository::new(self.db);

        Ok(channel_repo.upsert(channel).await?)
    }

    pub async fn delete(&self, channel_id: u64) -> Result<(), AppError> {
        let channel_repo = DiscordGuildChannelRepository::new(self.db);

        channel_repo.delete(channel_id).await?;

        Ok(())
    }

    /// Gets the guild's channels ordered by position.
    pub async fn get_channels(&self, guild_id: u64) -> Result<Vec<DiscordGuildChannel>, AppError> {
        let channel_repo = DiscordGuildChannelRepository::new(self.db);

        Ok(channel_repo.get_by_guild_id(guild_id).await?)
    }
}
