use sea_orm::DatabaseConnection;

use crate::{
    model::designation::DesignatedChannelType,
    server::{
        error::AppError,
        model::{infraction::Infraction, message::DeletedMessage},
        service::{discord::GuildActions, notification::Notification},
        util::text::quote,
    },
};

use super::post_to_designated;

/// Posts moderation notifications to the guild's `ModerationLog` channels.
pub async fn relay(
    db: &DatabaseConnection,
    actions: &dyn GuildActions,
    notification: &Notification,
) -> Result<(), AppError> {
    let Some(content) = format_notification(notification) else {
        return Ok(());
    };

    post_to_designated(
        db,
        actions,
        notification.guild_id(),
        DesignatedChannelType::ModerationLog,
        &content,
    )
    .await?;

    Ok(())
}

/// Renders a moderation notification, or `None` for other notifications.
pub fn format_notification(notification: &Notification) -> Option<String> {
    let content = match notification {
        Notification::InfractionCreated { infraction } => format_created(infraction),
        Notification::InfractionRescinded { infraction } => {
            let mut content = format!(
                "\u{2705} {} `#{}` of <@{}> rescinded by <@{}>",
                infraction.infraction_type,
                infraction.id,
                infraction.subject_id,
                infraction.rescinded_by_id.unwrap_or_default()
            );
            if let Some(reason) = &infraction.rescind_reason {
                content.push_str(&format!("\n**Reason:** {}", reason));
            }
            content
        }
        Notification::InfractionDeleted {
            infraction,
            deleted_by_id,
        } => format!(
            "\u{1f5d1}\u{fe0f} {} `#{}` of <@{}> deleted by <@{}>",
            infraction.infraction_type, infraction.id, infraction.subject_id, deleted_by_id
        ),
        Notification::MessagesDeleted {
            channel_id,
            deleted_by_id,
            batch_id,
            messages,
            ..
        } => format_deleted_messages(*channel_id, *deleted_by_id, *batch_id, messages),
        _ => return None,
    };

    Some(content)
}

fn format_created(infraction: &Infraction) -> String {
    let mut content = format!(
        "\u{1f6a8} {} `#{}` given to <@{}> by <@{}>",
        infraction.infraction_type, infraction.id, infraction.subject_id, infraction.created_by_id
    );

    if let Some(expires_at) = infraction.expires_at() {
        content.push_str(&format!(", expires <t:{}:R>", expires_at.timestamp()));
    }

    content.push_str(&format!("\n**Reason:** {}", infraction.reason));
    content
}

fn format_deleted_messages(
    channel_id: u64,
    deleted_by_id: u64,
    batch_id: Option<i32>,
    messages: &[DeletedMessage],
) -> String {
    match (batch_id, messages) {
        (Some(batch_id), _) => format!(
            "\u{1f9f9} <@{}> cleaned {} message(s) in <#{}> (batch `#{}`)",
            deleted_by_id,
            messages.len(),
            channel_id,
            batch_id
        ),
        (None, [message]) => format!(
            "\u{1f5d1}\u{fe0f} Message by <@{}> in <#{}> deleted by <@{}>\n**Reason:** {}\n{}",
            message.author_id,
            channel_id,
            deleted_by_id,
            message.reason,
            quote(&message.content)
        ),
        (None, messages) => format!(
            "\u{1f5d1}\u{fe0f} <@{}> deleted {} message(s) in <#{}>",
            deleted_by_id,
            messages.len(),
            channel_id
        ),
    }
}
