use sea_orm::DatabaseConnection;

use crate::{
    model::designation::DesignatedChannelType,
    server::{
        error::AppError,
        service::{designation::DesignationService, discord::GuildActions},
        util::text::quote,
    },
};

use super::post_to_designated;

/// What is known about an edited or deleted message.
///
/// Author and previous content come from Serenity's cache, so they are missing
/// for messages older than the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedMessage {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: Option<u64>,
    pub content: Option<String>,
}

pub async fn log_edit(
    db: &DatabaseConnection,
    actions: &dyn GuildActions,
    message: &LoggedMessage,
    new_content: &str,
) -> Result<bool, AppError> {
    if !is_logged_channel(db, message).await? {
        return Ok(false);
    }

    post_to_designated(
        db,
        actions,
        message.guild_id,
        DesignatedChannelType::MessageLog,
        &format_edit(message, new_content),
    )
    .await?;

    Ok(true)
}

pub async fn log_delete(
    db: &DatabaseConnection,
    actions: &dyn GuildActions,
    message: &LoggedMessage,
) -> Result<bool, AppError> {
    if !is_logged_channel(db, message).await? {
        return Ok(false);
    }

    post_to_designated(
        db,
        actions,
        message.guild_id,
        DesignatedChannelType::MessageLog,
        &format_delete(message),
    )
    .await?;

    Ok(true)
}

/// Unmoderated channels and the message log channels themselves are skipped.
async fn is_logged_channel(
    db: &DatabaseConnection,
    message: &LoggedMessage,
) -> Result<bool, AppError> {
    let designations = DesignationService::new(db);

    for designation in [
        DesignatedChannelType::Unmoderated,
        DesignatedChannelType::MessageLog,
    ] {
        if designations
            .channel_has(message.guild_id, message.channel_id, designation)
            .await?
        {
            return Ok(false);
        }
    }

    Ok(true)
}

fn header(action: &str, message: &LoggedMessage) -> String {
    let author = message
        .author_id
        .map(|id| format!(" by <@{}>", id))
        .unwrap_or_default();

    format!(
        "Message `{}`{} {} in <#{}>",
        message.message_id, author, action, message.channel_id
    )
}

pub fn format_edit(message: &LoggedMessage, new_content: &str) -> String {
    let before = message
        .content
        .as_deref()
        .map(quote)
        .unwrap_or_else(|| "> *(not cached)*".to_string());

    format!(
        "\u{270f}\u{fe0f} {}\n**Before:**\n{}\n**After:**\n{}",
        header("edited", message),
        before,
        quote(new_content)
    )
}

pub fn format_delete(message: &LoggedMessage) -> String {
    let content = message
        .content
        .as_deref()
        .map(quote)
        .unwrap_or_else(|| "> *(not cached)*".to_string());

    format!(
        "\u{1f5d1}\u{fe0f} {}\n{}",
        header("deleted", message),
        content
    )
}
