use sea_orm::DatabaseConnection;

use crate::{
    model::designation::DesignatedChannelType,
    server::{
        error::AppError,
        service::{discord::GuildActions, notification::Notification},
    },
};

use super::post_to_designated;

/// Posts campaign notifications to the guild's `PromotionLog` channels, and
/// announces new campaigns in its `PromotionNotifications` channels.
///
/// Comment authors are never named, only sentiments.
pub async fn relay(
    db: &DatabaseConnection,
    actions: &dyn GuildActions,
    app_url: &str,
    notification: &Notification,
) -> Result<(), AppError> {
    let Some(content) = format_log(notification) else {
        return Ok(());
    };
    let guild_id = notification.guild_id();

    post_to_designated(
        db,
        actions,
        guild_id,
        DesignatedChannelType::PromotionLog,
        &content,
    )
    .await?;

    if let Some(announcement) = format_announcement(notification, app_url) {
        post_to_designated(
            db,
            actions,
            guild_id,
            DesignatedChannelType::PromotionNotifications,
            &announcement,
        )
        .await?;
    }

    Ok(())
}

pub fn format_log(notification: &Notification) -> Option<String> {
    let content = match notification {
        Notification::CampaignCreated { campaign } => format!(
            "\u{1f4e3} Campaign `#{}` started for <@{}> towards <@&{}> by <@{}>",
            campaign.id, campaign.subject_id, campaign.target_role_id, campaign.created_by_id
        ),
        Notification::CampaignCommentCreated { campaign, comment } => format!(
            "\u{1f4ac} New **{}** comment on campaign `#{}` for <@{}>",
            comment.sentiment, campaign.id, campaign.subject_id
        ),
        Notification::CampaignClosed { campaign } => {
            let outcome = campaign
                .outcome
                .map(|outcome| outcome.to_string())
                .unwrap_or_else(|| "Closed".to_string());

            match campaign.closed_by_id {
                Some(closed_by_id) => format!(
                    "\u{1f3c1} Campaign `#{}` for <@{}> towards <@&{}>: **{}** by <@{}>",
                    campaign.id, campaign.subject_id, campaign.target_role_id, outcome, closed_by_id
                ),
                None => format!(
                    "\u{1f3c1} Campaign `#{}` for <@{}> towards <@&{}>: **{}**",
                    campaign.id, campaign.subject_id, campaign.target_role_id, outcome
                ),
            }
        }
        _ => return None,
    };

    Some(content)
}

fn format_announcement(notification: &Notification, app_url: &str) -> Option<String> {
    let Notification::CampaignCreated { campaign } = notification else {
        return None;
    };

    Some(format!(
        "<@{}> has been nominated for promotion to <@&{}>! Share your thoughts: {}/promotions/{}",
        campaign.subject_id,
        campaign.target_role_id,
        app_url.trim_end_matches('/'),
        campaign.id
    ))
}
