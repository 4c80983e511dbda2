use sea_orm::DatabaseConnection;

use crate::{
    model::{authorization::AuthorizationClaim, infraction::InfractionType},
    server::{
        error::AppError,
        model::{
            authorization::AuthContext, infraction::InfractionSearchCriteria,
            promotion::CampaignSummary, user::UserInfo,
        },
        service::{
            authorization::AuthorizationService, discord::GuildActions,
            moderation::ModerationService, notification::NotificationPublisher,
            promotion::PromotionService, user::UserService,
        },
    },
};

use super::parse::{BotCommand, HELP_TEXT};

/// Number of infractions listed by the `infractions` command.
const INFRACTION_LIST_LIMIT: u64 = 10;

/// Where a command was invoked and by whom.
pub struct CommandContext<'a> {
    pub db: &'a DatabaseConnection,
    pub actions: &'a dyn GuildActions,
    pub notifications: &'a NotificationPublisher,
    pub guild_id: u64,
    pub channel_id: u64,
    pub invoker_id: u64,
}

/// Runs a command and renders the reply sent back to the invoker.
///
/// Errors are rendered into the reply as well, so the caller always has
/// something to send.
pub async fn execute(cmd: &CommandContext<'_>, command: BotCommand) -> String {
    if command == BotCommand::Help {
        return HELP_TEXT.to_string();
    }

    let result = async {
        let ctx = AuthorizationService::new(cmd.db)
            .build_context(cmd.guild_id, cmd.invoker_id)
            .await?;

        run(cmd, &ctx, command).await
    }
    .await;

    match result {
        Ok(reply) => reply,
        Err(e) => {
            tracing::debug!(
                "Command by {} in guild {} failed: {}",
                cmd.invoker_id,
                cmd.guild_id,
                e
            );
            format!("\u{274c} {}", e.user_message())
        }
    }
}

async fn run(
    cmd: &CommandContext<'_>,
    ctx: &AuthContext,
    command: BotCommand,
) -> Result<String, AppError> {
    let moderation = ModerationService::new(cmd.db, cmd.actions, cmd.notifications);
    let promotions = PromotionService::new(cmd.db, cmd.actions, cmd.notifications);

    let reply = match command {
        BotCommand::Help => HELP_TEXT.to_string(),
        BotCommand::Infract {
            infraction_type,
            subject_id,
            duration,
            reason,
        } => {
            let infraction = moderation
                .create_infraction(ctx, infraction_type, subject_id, &reason, duration)
                .await?;

            match infraction.expires_at() {
                Some(expires_at) => format!(
                    "{} #{} recorded for <@{}>, expires <t:{}:R>.",
                    infraction.infraction_type,
                    infraction.id,
                    subject_id,
                    expires_at.timestamp()
                ),
                None => format!(
                    "{} #{} recorded for <@{}>.",
                    infraction.infraction_type, infraction.id, subject_id
                ),
            }
        }
        BotCommand::Unmute { subject_id } => {
            let infraction = moderation
                .rescind_active(ctx, subject_id, InfractionType::Mute)
                .await?;
            format!("Mute #{} of <@{}> rescinded.", infraction.id, subject_id)
        }
        BotCommand::Unban { subject_id } => {
            let infraction = moderation
                .rescind_active(ctx, subject_id, InfractionType::Ban)
                .await?;
            format!("Ban #{} of <@{}> rescinded.", infraction.id, subject_id)
        }
        BotCommand::RescindInfraction { infraction_id } => {
            let infraction = moderation
                .rescind_infraction(ctx, infraction_id, None)
                .await?;
            format!(
                "{} #{} rescinded.",
                infraction.infraction_type, infraction.id
            )
        }
        BotCommand::DeleteInfraction { infraction_id } => {
            let infraction = moderation.delete_infraction(ctx, infraction_id).await?;
            format!("{} #{} deleted.", infraction.infraction_type, infraction.id)
        }
        BotCommand::Infractions { subject_id } => {
            let criteria = InfractionSearchCriteria {
                subject_id: Some(subject_id),
                is_deleted: Some(false),
                ..Default::default()
            };
            let page = moderation
                .search_infractions(ctx, &criteria, 0, INFRACTION_LIST_LIMIT)
                .await?;

            if page.items.is_empty() {
                format!("<@{}> has no infractions.", subject_id)
            } else {
                let mut reply = format!(
                    "<@{}> has {} infraction(s):",
                    subject_id, page.total
                );
                for infraction in page.items {
                    let status = if infraction.rescinded_at.is_some() {
                        " (rescinded)"
                    } else {
                        ""
                    };
                    reply.push_str(&format!(
                        "\n`#{}` **{}**{} <t:{}:d>: {}",
                        infraction.id,
                        infraction.infraction_type,
                        status,
                        infraction.created_at.timestamp(),
                        infraction.reason
                    ));
                }
                reply
            }
        }
        BotCommand::Clean { count, author_id } => {
            let batch = moderation
                .clean_messages(ctx, cmd.channel_id, count, author_id)
                .await?;
            format!("Deleted {} message(s).", batch.message_count)
        }
        BotCommand::Info { user_id } => {
            let info = UserService::new(cmd.db).get_user_info(ctx, user_id).await?;
            format_user_info(info)
        }
        BotCommand::Claims { user_id } => {
            let target_id = user_id.unwrap_or(ctx.user_id);
            let claims = if target_id == ctx.user_id {
                ctx.claims.clone()
            } else {
                ctx.require_claims(&[AuthorizationClaim::AuthorizationConfigure])?;
                AuthorizationService::new(cmd.db)
                    .build_context(ctx.guild_id, target_id)
                    .await?
                    .claims
            };

            if claims.is_empty() {
                format!("<@{}> holds no claims.", target_id)
            } else {
                let names: Vec<&str> = claims.iter().map(|claim| claim.as_ref()).collect();
                format!("<@{}> holds: {}", target_id, names.join(", "))
            }
        }
        BotCommand::ListCampaigns => {
            let campaigns = promotions.search_campaigns(ctx, true).await?;

            if campaigns.is_empty() {
                "There are no open campaigns.".to_string()
            } else {
                campaigns
                    .iter()
                    .map(format_campaign)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        BotCommand::Nominate {
            subject_id,
            comment,
        } => {
            let campaign = promotions
                .create_campaign(ctx, subject_id, &comment)
                .await?;
            format!(
                "Campaign #{} started for <@{}> towards <@&{}>.",
                campaign.id, subject_id, campaign.target_role_id
            )
        }
        BotCommand::Comment {
            campaign_id,
            sentiment,
            content,
        } => {
            promotions
                .add_comment(ctx, campaign_id, sentiment, &content)
                .await?;
            format!("Comment added to campaign #{}.", campaign_id)
        }
        BotCommand::AcceptCampaign { campaign_id, force } => {
            let campaign = promotions
                .accept_campaign(ctx, campaign_id, force)
                .await?;
            match campaign.outcome {
                Some(outcome) => format!("Campaign #{} closed: {}.", campaign.id, outcome),
                None => format!("Campaign #{} accepted.", campaign.id),
            }
        }
        BotCommand::RejectCampaign { campaign_id } => {
            let campaign = promotions.reject_campaign(ctx, campaign_id).await?;
            format!("Campaign #{} rejected.", campaign.id)
        }
    };

    Ok(reply)
}

fn format_campaign(summary: &CampaignSummary) -> String {
    format!(
        "`#{}` <@{}> towards <@&{}>, started <t:{}:R> (\u{1f44d} {} \u{1f937} {} \u{1f44e} {})",
        summary.campaign.id,
        summary.campaign.subject_id,
        summary.campaign.target_role_id,
        summary.campaign.created_at.timestamp(),
        summary.approve_count,
        summary.abstain_count,
        summary.oppose_count
    )
}

fn format_user_info(info: UserInfo) -> String {
    let mut lines = vec![format!(
        "**{}** (<@{}>){}",
        info.user.username,
        info.user.discord_id,
        if info.user.is_bot { " [bot]" } else { "" }
    )];

    lines.push(format!(
        "Account created <t:{}:R>",
        info.user.created_at.timestamp()
    ));

    match &info.membership {
        Some(member) if member.is_member => {
            if let Some(nickname) = &member.nickname {
                lines.push(format!("Nickname: {}", nickname));
            }
            lines.push(format!(
                "First seen <t:{}:R>, last seen <t:{}:R>",
                member.first_seen.timestamp(),
                member.last_seen.timestamp()
            ));
        }
        _ => lines.push("Not a member of this guild".to_string()),
    }

    if !info.roles.is_empty() {
        let roles: Vec<String> = info
            .roles
            .iter()
            .map(|role| format!("<@&{}>", role.role_id))
            .collect();
        lines.push(format!("Roles: {}", roles.join(" ")));
    }

    let total_messages: u64 = info.message_counts.iter().map(|c| c.count).sum();
    lines.push(format!("Messages in the last 30 days: {}", total_messages));

    if let Some(counts) = info.infraction_counts {
        lines.push(format!(
            "Infractions: {} notice(s), {} warning(s), {} mute(s), {} ban(s)",
            counts.notice, counts.warning, counts.mute, counts.ban
        ));
    }

    lines.join("\n")
}
