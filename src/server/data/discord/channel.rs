use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serenity::all::{ChannelId, GuildChannel};
use std::collections::HashMap;

use crate::server::model::discord::DiscordGuildChannel;

pub struct DiscordGuildChannelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DiscordGuildChannelRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn upsert(&self, channel: &GuildChannel) -> Result<DiscordGuildChannel, DbErr> {
        let entity =
            entity::prelude::DiscordGuildChannel::insert(entity::discord_guild_channel::ActiveModel {
                channel_id: ActiveValue::Set(channel.id.get().to_string()),
                guild_id: ActiveValue::Set(channel.guild_id.get().to_string()),
                name: ActiveValue::Set(channel.name.clone()),
                kind: ActiveValue::Set(channel.kind.name().to_string()),
                position: ActiveValue::Set(i32::from(channel.position)),
                parent_id: ActiveValue::Set(channel.parent_id.map(|id| id.get().to_string())),
            })
            .on_conflict(
                OnConflict::column(entity::discord_guild_channel::Column::ChannelId)
                    .update_columns([
                        entity::discord_guild_channel::Column::Name,
                        entity::discord_guild_channel::Column::Kind,
                        entity::discord_guild_channel::Column::Position,
                        entity::discord_guild_channel::Column::ParentId,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        DiscordGuildChannel::from_entity(entity)
    }

    /// Upserts every channel of a guild, then removes stored channels that no longer exist.
    pub async fn sync_guild_channels(
        &self,
        guild_id: u64,
        channels: &HashMap<ChannelId, GuildChannel>,
    ) -> Result<Vec<DiscordGuildChannel>, DbErr> {
        let mut results = Vec::new();

        for channel in channels.values() {
            results.push(self.upsert(channel).await?);
        }

        let keep: Vec<String> = channels.keys().map(|id| id.get().to_string()).collect();
        entity::prelude::DiscordGuildChannel::delete_many()
            .filter(entity::discord_guild_channel::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::discord_guild_channel::Column::ChannelId.is_not_in(keep))
            .exec(self.db)
            .await?;

        Ok(results)
    }

    pub async fn delete(&self, channel_id: u64) -> Result<(), DbErr> {
        entity::prelude::DiscordGuildChannel::delete_many()
            .filter(entity::discord_guild_channel::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, channel_id: u64) -> Result<Option<DiscordGuildChannel>, DbErr> {
        entity::prelude::DiscordGuildChannel::find_by_id(channel_id.to_string())
            .one(self.db)
            .await?
            .map(DiscordGuildChannel::from_entity)
            .transpose()
    }

    /// Gets all channels for a guild ordered by position.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<DiscordGuildChannel>, DbErr> {
        entity::prelude::DiscordGuildChannel::find()
            .filter(entity::discord_guild_channel::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::discord_guild_channel::Column::Position)
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordGuildChannel::from_entity)
            .collect()
    }
}
