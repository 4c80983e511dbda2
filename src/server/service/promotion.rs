//! Promotion campaigns.
//!
//! A campaign proposes promoting a member to the next rank above their
//! current one. Members comment with a sentiment while it is open, and a
//! moderator with `PromotionsCloseCampaign` accepts or rejects it.

use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        authorization::AuthorizationClaim,
        promotion::{CampaignOutcome, PromotionSentiment},
    },
    server::{
        data::{
            discord::{GuildUserRepository, GuildUserRoleRepository},
            is_unique_violation,
            promotion::{
                PromotionActionRepository, PromotionCampaignRepository, PromotionCommentRepository,
            },
        },
        error::{promotion::PromotionError, AppError},
        model::{
            authorization::AuthContext,
            discord::DiscordGuildRole,
            promotion::{
                CampaignDetails, CampaignSummary, PromotionActionType, PromotionCampaign,
                PromotionComment,
            },
        },
        service::{
            discord::GuildActions,
            notification::{Notification, NotificationPublisher},
            rank,
        },
    },
};

pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Days before a rejected campaign for the same subject and rank may be reopened.
pub const REJECTION_COOLDOWN_DAYS: i64 = 30;

/// Hours a campaign must stay open before it can be accepted without force.
pub const ACCEPT_DELAY_HOURS: i64 = 48;

pub struct PromotionService<'a> {
    db: &'a DatabaseConnection,
    actions: &'a dyn GuildActions,
    notifications: &'a NotificationPublisher,
}

impl<'a> PromotionService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        actions: &'a dyn GuildActions,
        notifications: &'a NotificationPublisher,
    ) -> Self {
        Self {
            db,
            actions,
            notifications,
        }
    }

    /// Gets the guild's rank roles, lowest first.
    pub async fn get_rank_roles(&self, guild_id: u64) -> Result<Vec<DiscordGuildRole>, AppError> {
        rank::get_rank_roles(self.db, guild_id).await
    }

    /// Gets the rank a member would be promoted to, or `None` at the top.
    pub async fn get_next_rank_role(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<DiscordGuildRole>, AppError> {
        let ranks = rank::get_rank_roles(self.db, guild_id).await?;
        let role_ids = GuildUserRoleRepository::new(self.db)
            .get_role_ids(guild_id, user_id)
            .await?;

        Ok(rank::next_rank(&ranks, &role_ids).cloned())
    }

    /// Opens a campaign to promote a member to their next rank.
    ///
    /// The creator's comment is recorded as the campaign's first `Approve`.
    ///
    /// # Returns
    /// - `Ok(PromotionCampaign)` - The open campaign
    /// - `Err(PromotionError)` - The subject can't be nominated, see the
    ///   variants for each rule
    pub async fn create_campaign(
        &self,
        ctx: &AuthContext,
        subject_id: u64,
        comment: &str,
    ) -> Result<PromotionCampaign, AppError> {
        ctx.require_claims(&[AuthorizationClaim::PromotionsCreateCampaign])?;

        let comment = validate_comment(comment)?;

        if subject_id == ctx.user_id {
            return Err(PromotionError::SelfNomination.into());
        }

        let is_member = GuildUserRepository::new(self.db)
            .find(ctx.guild_id, subject_id)
            .await?
            .is_some_and(|membership| membership.is_member);
        if !is_member {
            return Err(PromotionError::SubjectNotMember(subject_id).into());
        }

        let ranks = rank::get_rank_roles(self.db, ctx.guild_id).await?;
        let subject_roles = GuildUserRoleRepository::new(self.db)
            .get_role_ids(ctx.guild_id, subject_id)
            .await?;
        let target = rank::next_rank(&ranks, &subject_roles).ok_or(PromotionError::NoNextRank)?;

        if !ctx.is_system {
            let creator_rank = rank::highest_rank(&ranks, &ctx.role_ids);
            if !creator_rank.is_some_and(|creator| target.position < creator.position) {
                return Err(PromotionError::TargetNotBelowCreator.into());
            }
        }

        let campaign_repo = PromotionCampaignRepository::new(self.db);

        if campaign_repo
            .find_open_for_subject(ctx.guild_id, subject_id)
            .await?
            .is_some()
        {
            return Err(PromotionError::CampaignAlreadyOpen.into());
        }

        let cooldown_start = Utc::now() - Duration::days(REJECTION_COOLDOWN_DAYS);
        let recently_rejected = campaign_repo
            .find_latest_rejected(ctx.guild_id, subject_id, target.role_id)
            .await?
            .and_then(|campaign| campaign.closed_at)
            .is_some_and(|closed_at| closed_at > cooldown_start);
        if recently_rejected {
            return Err(PromotionError::RecentlyRejected {
                days: REJECTION_COOLDOWN_DAYS,
            }
            .into());
        }

        let txn = self.db.begin().await?;
        let action_repo = PromotionActionRepository::new(&txn);
        let campaign_repo = PromotionCampaignRepository::new(&txn);

        // Another campaign may have been opened since the check above
        if campaign_repo
            .find_open_for_subject(ctx.guild_id, subject_id)
            .await?
            .is_some()
        {
            return Err(PromotionError::CampaignAlreadyOpen.into());
        }

        let campaign = campaign_repo
            .create(ctx.guild_id, subject_id, target.role_id, ctx.user_id)
            .await
            .map_err(|e| unique_violation_as(e, PromotionError::CampaignAlreadyOpen))?;
        let first_comment = PromotionCommentRepository::new(&txn)
            .create(
                campaign.id,
                PromotionSentiment::Approve,
                &comment,
                ctx.user_id,
            )
            .await?;
        action_repo
            .create(
                ctx.guild_id,
                PromotionActionType::CampaignCreated,
                ctx.user_id,
                Some(campaign.id),
                None,
            )
            .await?;
        action_repo
            .create(
                ctx.guild_id,
                PromotionActionType::CommentCreated,
                ctx.user_id,
                Some(campaign.id),
                Some(first_comment.id),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} opened campaign {} promoting {} to role {} in guild {}",
            ctx.user_id,
            campaign.id,
            subject_id,
            target.role_id,
            ctx.guild_id
        );

        self.notifications.publish(Notification::CampaignCreated {
            campaign: campaign.clone(),
        });

        Ok(campaign)
    }

    /// Adds the caller's comment to an open campaign.
    pub async fn add_comment(
        &self,
        ctx: &AuthContext,
        campaign_id: i32,
        sentiment: PromotionSentiment,
        content: &str,
    ) -> Result<PromotionComment, AppError> {
        ctx.require_claims(&[AuthorizationClaim::PromotionsComment])?;

        let content = validate_comment(content)?;
        let campaign = self.get_open_campaign(ctx.guild_id, campaign_id).await?;

        if campaign.subject_id == ctx.user_id {
            return Err(PromotionError::SubjectCannotComment.into());
        }

        if PromotionCommentRepository::new(self.db)
            .find_by_author(campaign.id, ctx.user_id)
            .await?
            .is_some()
        {
            return Err(PromotionError::AlreadyCommented.into());
        }

        let txn = self.db.begin().await?;

        let still_open = PromotionCampaignRepository::new(&txn)
            .find_by_id(ctx.guild_id, campaign.id)
            .await?
            .is_some_and(|campaign| campaign.is_open());
        if !still_open {
            return Err(PromotionError::CampaignClosed(campaign.id).into());
        }

        let comment = PromotionCommentRepository::new(&txn)
            .create(campaign.id, sentiment, &content, ctx.user_id)
            .await
            .map_err(|e| unique_violation_as(e, PromotionError::AlreadyCommented))?;
        PromotionActionRepository::new(&txn)
            .create(
                ctx.guild_id,
                PromotionActionType::CommentCreated,
                ctx.user_id,
                Some(campaign.id),
                Some(comment.id),
            )
            .await?;

        txn.commit().await?;

        self.notifications
            .publish(Notification::CampaignCommentCreated {
                campaign,
                comment: comment.clone(),
            });

        Ok(comment)
    }

    /// Replaces the sentiment and content of the caller's own comment.
    pub async fn update_comment(
        &self,
        ctx: &AuthContext,
        comment_id: i32,
        sentiment: PromotionSentiment,
        content: &str,
    ) -> Result<PromotionComment, AppError> {
        let content = validate_comment(content)?;

        let existing = PromotionCommentRepository::new(self.db)
            .find_by_id(comment_id)
            .await?
            .ok_or(PromotionError::CommentNotFound(comment_id))?;

        // Comments of other guilds are reported as missing
        let campaign = PromotionCampaignRepository::new(self.db)
            .find_by_id(ctx.guild_id, existing.campaign_id)
            .await?
            .ok_or(PromotionError::CommentNotFound(comment_id))?;

        if existing.created_by_id != ctx.user_id {
            return Err(PromotionError::NotCommentAuthor.into());
        }
        if !campaign.is_open() {
            return Err(PromotionError::CampaignClosed(campaign.id).into());
        }

        let txn = self.db.begin().await?;

        let comment = PromotionCommentRepository::new(&txn)
            .update(comment_id, sentiment, &content)
            .await?;
        PromotionActionRepository::new(&txn)
            .create(
                ctx.guild_id,
                PromotionActionType::CommentModified,
                ctx.user_id,
                Some(campaign.id),
                Some(comment.id),
            )
            .await?;

        txn.commit().await?;

        Ok(comment)
    }

    /// Closes a campaign by promoting its subject.
    ///
    /// The campaign is closed as `Failed` when the rank can't be applied,
    /// usually because the subject has left the guild.
    ///
    /// # Arguments
    /// - `force`: Accept before the campaign has been open for `ACCEPT_DELAY_HOURS`
    pub async fn accept_campaign(
        &self,
        ctx: &AuthContext,
        campaign_id: i32,
        force: bool,
    ) -> Result<PromotionCampaign, AppError> {
        ctx.require_claims(&[AuthorizationClaim::PromotionsCloseCampaign])?;

        let campaign = self.get_open_campaign(ctx.guild_id, campaign_id).await?;

        let accept_after = campaign.created_at + Duration::hours(ACCEPT_DELAY_HOURS);
        if !force && Utc::now() < accept_after {
            return Err(PromotionError::TooEarlyToAccept {
                hours: ACCEPT_DELAY_HOURS,
            }
            .into());
        }

        self.close(ctx, campaign, CampaignOutcome::Accepted).await
    }

    pub async fn reject_campaign(
        &self,
        ctx: &AuthContext,
        campaign_id: i32,
    ) -> Result<PromotionCampaign, AppError> {
        ctx.require_claims(&[AuthorizationClaim::PromotionsCloseCampaign])?;

        let campaign = self.get_open_campaign(ctx.guild_id, campaign_id).await?;

        self.close(ctx, campaign, CampaignOutcome::Rejected).await
    }

    /// Lists the guild's campaigns with their comment tallies, newest first.
    pub async fn search_campaigns(
        &self,
        ctx: &AuthContext,
        active_only: bool,
    ) -> Result<Vec<CampaignSummary>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::PromotionsRead])?;

        let campaigns = PromotionCampaignRepository::new(self.db)
            .get_by_guild(ctx.guild_id, active_only.then_some(true))
            .await?;

        let campaign_ids: Vec<i32> = campaigns.iter().map(|c| c.id).collect();
        let comments = PromotionCommentRepository::new(self.db)
            .get_by_campaigns(&campaign_ids)
            .await?;

        Ok(campaigns
            .into_iter()
            .map(|campaign| {
                let campaign_comments: Vec<PromotionComment> = comments
                    .iter()
                    .filter(|comment| comment.campaign_id == campaign.id)
                    .cloned()
                    .collect();
                CampaignSummary::from_comments(campaign, &campaign_comments)
            })
            .collect())
    }

    pub async fn get_campaign_details(
        &self,
        ctx: &AuthContext,
        campaign_id: i32,
    ) -> Result<CampaignDetails, AppError> {
        ctx.require_claims(&[AuthorizationClaim::PromotionsRead])?;

        let campaign = PromotionCampaignRepository::new(self.db)
            .find_by_id(ctx.guild_id, campaign_id)
            .await?
            .ok_or(PromotionError::CampaignNotFound(campaign_id))?;
        let comments = PromotionCommentRepository::new(self.db)
            .get_by_campaign(campaign.id)
            .await?;

        Ok(CampaignDetails {
            summary: CampaignSummary::from_comments(campaign, &comments),
            comments,
            viewer_id: ctx.user_id,
        })
    }

    /// Tallies the comments of a campaign the caller just acted on.
    pub async fn summarize(&self, campaign: PromotionCampaign) -> Result<CampaignSummary, AppError> {
        let comments = PromotionCommentRepository::new(self.db)
            .get_by_campaign(campaign.id)
            .await?;

        Ok(CampaignSummary::from_comments(campaign, &comments))
    }

    async fn get_open_campaign(
        &self,
        guild_id: u64,
        campaign_id: i32,
    ) -> Result<PromotionCampaign, AppError> {
        let campaign = PromotionCampaignRepository::new(self.db)
            .find_by_id(guild_id, campaign_id)
            .await?
            .ok_or(PromotionError::CampaignNotFound(campaign_id))?;

        if !campaign.is_open() {
            return Err(PromotionError::CampaignClosed(campaign_id).into());
        }

        Ok(campaign)
    }

    /// Adds the target rank to the subject and mirrors it.
    ///
    /// Returns `Failed` when the subject is gone or the role can't be added.
    async fn apply_promotion<C: ConnectionTrait>(
        &self,
        db: &C,
        campaign: &PromotionCampaign,
    ) -> Result<CampaignOutcome, AppError> {
        let is_member = GuildUserRepository::new(db)
            .find(campaign.guild_id, campaign.subject_id)
            .await?
            .is_some_and(|membership| membership.is_member);
        if !is_member {
            tracing::warn!(
                "Subject {} of campaign {} is no longer a member",
                campaign.subject_id,
                campaign.id
            );
            return Ok(CampaignOutcome::Failed);
        }

        let reason = format!("Promotion campaign {} accepted", campaign.id);
        if let Err(e) = self
            .actions
            .add_role(
                campaign.guild_id,
                campaign.subject_id,
                campaign.target_role_id,
                &reason,
            )
            .await
        {
            tracing::warn!(
                "Failed to add role {} to {} for campaign {}: {}",
                campaign.target_role_id,
                campaign.subject_id,
                campaign.id,
                e
            );
            return Ok(CampaignOutcome::Failed);
        }

        GuildUserRoleRepository::new(db)
            .add(
                campaign.guild_id,
                campaign.subject_id,
                campaign.target_role_id,
            )
            .await?;

        Ok(CampaignOutcome::Accepted)
    }

    /// Closes the campaign, promoting the subject when `outcome` is `Accepted`.
    ///
    /// The campaign is marked closed before the role is added, so a second
    /// close fails with `CampaignClosed` and never touches Discord.
    async fn close(
        &self,
        ctx: &AuthContext,
        campaign: PromotionCampaign,
        outcome: CampaignOutcome,
    ) -> Result<PromotionCampaign, AppError> {
        let txn = self.db.begin().await?;
        let campaign_repo = PromotionCampaignRepository::new(&txn);

        let mut closed = campaign_repo
            .close(campaign.id, outcome, ctx.user_id)
            .await?
            .ok_or(PromotionError::CampaignClosed(campaign.id))?;

        if outcome == CampaignOutcome::Accepted {
            let applied = self.apply_promotion(&txn, &campaign).await?;
            if applied != outcome {
                closed = campaign_repo.set_outcome(campaign.id, applied).await?;
            }
        }

        PromotionActionRepository::new(&txn)
            .create(
                ctx.guild_id,
                PromotionActionType::CampaignClosed,
                ctx.user_id,
                Some(campaign.id),
                None,
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} closed campaign {} as {} in guild {}",
            ctx.user_id,
            campaign.id,
            closed
                .outcome
                .map(|outcome| outcome.to_string())
                .unwrap_or_default(),
            ctx.guild_id
        );

        self.notifications.publish(Notification::CampaignClosed {
            campaign: closed.clone(),
        });

        Ok(closed)
    }
}

/// Reports a duplicate row as the given conflict, and anything else as is.
fn unique_violation_as(err: sea_orm::DbErr, conflict: PromotionError) -> AppError {
    if is_unique_violation(&err) {
        conflict.into()
    } else {
        err.into()
    }
}

fn validate_comment(content: &str) -> Result<String, PromotionError> {
    let content = content.trim();
    let length = content.chars().count();

    if length == 0 || length > MAX_COMMENT_LENGTH {
        return Err(PromotionError::InvalidComment {
            max: MAX_COMMENT_LENGTH,
        });
    }

    Ok(content.to_string())
}
