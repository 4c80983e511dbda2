use sea_orm::DatabaseConnection;
use serenity::all::Message;

use crate::server::{
    data::discord::{DiscordMessageRepository, GuildUserRepository},
    error::AppError,
};

pub struct DiscordMessageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordMessageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a guild message and bumps the author's last seen time.
    ///
    /// Direct messages and messages from bots are ignored.
    pub async fn record(&self, message: &Message) -> Result<(), AppError> {
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };
        if message.author.bot {
            return Ok(());
        }

        let (guild_id, author_id) = (guild_id.get(), message.author.id.get());
        let timestamp = chrono::DateTime::from_timestamp(message.timestamp.unix_timestamp(), 0)
            .unwrap_or_else(chrono::Utc::now);

        DiscordMessageRepository::new(self.db)
            .create(
                message.id.get(),
                guild_id,
                message.channel_id.get(),
                author_id,
                timestamp,
            )
            .await?;
        GuildUserRepository::new(self.db)
            .touch_last_seen(guild_id, author_id, timestamp)
            .await?;

        Ok(())
    }

    pub async fn remove(&self, message_id: u64) -> Result<(), AppError> {
        DiscordMessageRepository::new(self.db)
            .delete(message_id)
            .await?;

        Ok(())
    }
}
