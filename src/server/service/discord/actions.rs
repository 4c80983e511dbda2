//! Side effects the domain services perform on Discord.
//!
//! Services talk to Discord only through `GuildActions` so they can be tested
//! against a recording fake instead of the live REST API.

use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateMessage, EditRole, GuildId, Http, MessageId, PermissionOverwrite,
    PermissionOverwriteType, Permissions, Role, RoleId, User, UserId,
};
use std::sync::Arc;

use crate::server::{error::AppError, model::message::FetchedMessage};

/// Name given to the mute role when a guild doesn't have one designated.
pub const MUTE_ROLE_NAME: &str = "Modix Mute";

#[async_trait]
pub trait GuildActions: Send + Sync {
    async fn fetch_user(&self, user_id: u64) -> Result<User, AppError>;

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError>;

    async fn unban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError>;

    /// Creates a role that denies sending messages in every given channel.
    async fn create_mute_role(&self, guild_id: u64, channel_ids: &[u64]) -> Result<Role, AppError>;

    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<FetchedMessage, AppError>;

    /// Gets up to `limit` of the newest messages in the channel, newest first.
    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<FetchedMessage>, AppError>;

    async fn delete_message(
        &self,
        channel_id: u64,
        message_id: u64,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn delete_messages(&self, channel_id: u64, message_ids: &[u64]) -> Result<(), AppError>;

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), AppError>;

    async fn send_dm(&self, user_id: u64, content: &str) -> Result<(), AppError>;
}

/// `GuildActions` backed by Serenity's HTTP client.
pub struct SerenityGuildActions {
    http: Arc<Http>,
}

impl SerenityGuildActions {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl GuildActions for SerenityGuildActions {
    async fn fetch_user(&self, user_id: u64) -> Result<User, AppError> {
        Ok(self.http.get_user(UserId::new(user_id)).await?)
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.http
            .ban_user(GuildId::new(guild_id), UserId::new(user_id), 0, Some(reason))
            .await?;

        Ok(())
    }

    async fn unban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.http
            .remove_ban(GuildId::new(guild_id), UserId::new(user_id), Some(reason))
            .await?;

        Ok(())
    }

    async fn create_mute_role(&self, guild_id: u64, channel_ids: &[u64]) -> Result<Role, AppError> {
        let role = GuildId::new(guild_id)
            .create_role(
                &self.http,
                EditRole::new()
                    .name(MUTE_ROLE_NAME)
                    .permissions(Permissions::empty()),
            )
            .await?;

        let overwrite = PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::SEND_MESSAGES
                | Permissions::ADD_REACTIONS
                | Permissions::SEND_MESSAGES_IN_THREADS
                | Permissions::SPEAK,
            kind: PermissionOverwriteType::Role(role.id),
        };

        for channel_id in channel_ids {
            if let Err(e) = ChannelId::new(*channel_id)
                .create_permission(&self.http, overwrite.clone())
                .await
            {
                tracing::warn!(
                    "Failed to apply mute role {} to channel {}: {}",
                    role.id,
                    channel_id,
                    e
                );
            }
        }

        Ok(role)
    }

    async fn fetch_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<FetchedMessage, AppError> {
        let message = self
            .http
            .get_message(ChannelId::new(channel_id), MessageId::new(message_id))
            .await?;

        Ok(FetchedMessage::from(&message))
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<FetchedMessage>, AppError> {
        let messages = self
            .http
            .get_messages(ChannelId::new(channel_id), None, Some(limit))
            .await?;

        Ok(messages.iter().map(FetchedMessage::from).collect())
    }

    async fn delete_message(
        &self,
        channel_id: u64,
        message_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .delete_message(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn delete_messages(&self, channel_id: u64, message_ids: &[u64]) -> Result<(), AppError> {
        let channel_id = ChannelId::new(channel_id);

        // Bulk delete rejects fewer than two messages
        match message_ids {
            [] => {}
            [single] => {
                self.http
                    .delete_message(channel_id, MessageId::new(*single), None)
                    .await?
            }
            ids => {
                let body = serde_json::json!({
                    "messages": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                });
                self.http.delete_messages(channel_id, &body, None).await?
            }
        }

        Ok(())
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;

        Ok(())
    }

    async fn send_dm(&self, user_id: u64, content: &str) -> Result<(), AppError> {
        UserId::new(user_id)
            .direct_message(&self.http, CreateMessage::new().content(content))
            .await?;

        Ok(())
    }
}
