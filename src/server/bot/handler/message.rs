//! Message event handlers.
//!
//! New guild messages are mirrored for activity counts and checked for
//! commands. Edits and deletions are passed to the message log.

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, Context, GuildId, Message, MessageId, MessageUpdateEvent};

use crate::server::{
    bot::{
        behavior::message_log::{self, LoggedMessage},
        command::{execute, prefix, BotCommand, CommandContext},
    },
    service::{
        discord::{DiscordMessageService, SerenityGuildActions},
        notification::NotificationPublisher,
    },
    util::text::{truncate, MAX_MESSAGE_LENGTH},
};

/// Handle message creation in a channel
pub async fn handle_message(
    db: &DatabaseConnection,
    notifications: &NotificationPublisher,
    command_prefix: &str,
    ctx: Context,
    message: Message,
) {
    // Only guild channels, and never other bots
    let Some(guild_id) = message.guild_id else {
        return;
    };
    if message.author.bot {
        return;
    }

    if let Err(e) = DiscordMessageService::new(db).record(&message).await {
        tracing::error!(
            "Failed to record message {} in guild {}: {}",
            message.id,
            guild_id,
            e
        );
    }

    let bot_id = ctx.cache.current_user().id.get();
    let Some(input) = prefix::parse_prefix(&message.content, command_prefix, bot_id) else {
        return;
    };

    let tokens = prefix::tokenize(input);
    let reply = match BotCommand::parse(&tokens) {
        Ok(command) => {
            tracing::debug!(
                "Running {:?} for {} in guild {}",
                command,
                message.author.id,
                guild_id
            );

            let actions = SerenityGuildActions::new(ctx.http.clone());
            let cmd = CommandContext {
                db,
                actions: &actions,
                notifications,
                guild_id: guild_id.get(),
                channel_id: message.channel_id.get(),
                invoker_id: message.author.id.get(),
            };

            execute(&cmd, command).await
        }
        Err(e) => format!("\u{274c} {}", e),
    };

    if let Err(e) = message
        .reply(&ctx.http, truncate(&reply, MAX_MESSAGE_LENGTH))
        .await
    {
        tracing::error!(
            "Failed to reply to command in channel {}: {}",
            message.channel_id,
            e
        );
    }
}

pub async fn handle_message_update(
    db: &DatabaseConnection,
    ctx: Context,
    old_if_available: Option<Message>,
    new: Option<Message>,
    event: MessageUpdateEvent,
) {
    let Some(guild_id) = event.guild_id else {
        return;
    };

    // Embed resolution also fires updates, without new content
    let Some(after) = new
        .as_ref()
        .map(|m| m.content.clone())
        .or_else(|| event.content.clone())
    else {
        return;
    };

    let before = old_if_available.as_ref().map(|m| m.content.clone());
    if before.as_deref() == Some(after.as_str()) {
        return;
    }

    let author = new
        .as_ref()
        .map(|m| &m.author)
        .or(old_if_available.as_ref().map(|m| &m.author))
        .or(event.author.as_ref());
    let Some(author) = author else {
        return;
    };
    if author.bot {
        return;
    }

    let logged = LoggedMessage {
        guild_id: guild_id.get(),
        channel_id: event.channel_id.get(),
        message_id: event.id.get(),
        author_id: Some(author.id.get()),
        content: before,
    };

    let actions = SerenityGuildActions::new(ctx.http.clone());
    if let Err(e) = message_log::log_edit(db, &actions, &logged, &after).await {
        tracing::error!("Failed to log edit of message {}: {}", event.id, e);
    }
}

pub async fn handle_message_delete(
    db: &DatabaseConnection,
    ctx: Context,
    channel_id: ChannelId,
    deleted_message_id: MessageId,
    guild_id: Option<GuildId>,
) {
    let Some(guild_id) = guild_id else {
        return;
    };

    if let Err(e) = DiscordMessageService::new(db)
        .remove(deleted_message_id.get())
        .await
    {
        tracing::error!(
            "Failed to remove mirrored message {}: {}",
            deleted_message_id,
            e
        );
    }

    // Copy out of the cache guard before awaiting
    let cached = ctx
        .cache
        .message(channel_id, deleted_message_id)
        .map(|m| (m.author.id.get(), m.author.bot, m.content.clone()));

    if cached.as_ref().is_some_and(|(_, is_bot, _)| *is_bot) {
        return;
    }

    let logged = LoggedMessage {
        guild_id: guild_id.get(),
        channel_id: channel_id.get(),
        message_id: deleted_message_id.get(),
        author_id: cached.as_ref().map(|(author_id, _, _)| *author_id),
        content: cached.map(|(_, _, content)| content),
    };

    let actions = SerenityGuildActions::new(ctx.http.clone());
    if let Err(e) = message_log::log_delete(db, &actions, &logged).await {
        tracing::error!(
            "Failed to log deletion of message {}: {}",
            deleted_message_id,
            e
        );
    }
}
