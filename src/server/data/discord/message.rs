//! Mirrored message metadata.
//!
//! Only ids and timestamps are stored, enough to report per-channel activity
//! in user info. Message content is never persisted here.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use std::collections::BTreeMap;

use crate::server::{model::discord::ChannelMessageCount, util::parse::parse_snowflake};

pub struct DiscordMessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DiscordMessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a message. Messages already recorded are left untouched.
    pub async fn create(
        &self,
        message_id: u64,
        guild_id: u64,
        channel_id: u64,
        author_id: u64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let existing = entity::prelude::DiscordMessage::find_by_id(message_id.to_string())
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        entity::prelude::DiscordMessage::insert(entity::discord_message::ActiveModel {
            message_id: ActiveValue::Set(message_id.to_string()),
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
            author_id: ActiveValue::Set(author_id.to_string()),
            timestamp: ActiveValue::Set(timestamp),
        })
        .exec(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, message_id: u64) -> Result<(), DbErr> {
        entity::prelude::DiscordMessage::delete_by_id(message_id.to_string())
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Counts the author's messages per channel since `since`, busiest channel first.
    pub async fn count_by_channel(
        &self,
        guild_id: u64,
        author_id: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<ChannelMessageCount>, DbErr> {
        let channel_ids: Vec<String> = entity::prelude::DiscordMessage::find()
            .select_only()
            .column(entity::discord_message::Column::ChannelId)
            .filter(entity::discord_message::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::discord_message::Column::AuthorId.eq(author_id.to_string()))
            .filter(entity::discord_message::Column::Timestamp.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for channel_id in channel_ids {
            *counts.entry(channel_id).or_default() += 1;
        }

        let mut results = counts
            .into_iter()
            .map(|(channel_id, count)| {
                Ok(ChannelMessageCount {
                    channel_id: parse_snowflake(&channel_id, "channel_id")?,
                    count,
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        results.sort_by(|a, b| b.count.cmp(&a.count).then(a.channel_id.cmp(&b.channel_id)));

        Ok(results)
    }
}
