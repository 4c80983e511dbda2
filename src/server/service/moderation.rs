//! Infractions and message deletion.
//!
//! New infractions and message deletions are applied on Discord first and
//! recorded afterwards, so a failed Discord call leaves no record behind.
//! Rescinds and deletes are recorded first with a conditional update, and only
//! the caller whose update went through lifts the effect. Records and their
//! audit actions are written in one transaction, and a notification is
//! published once the transaction has committed.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        authorization::AuthorizationClaim, designation::DesignatedRoleType,
        infraction::{InfractionCountsDto, InfractionType},
    },
    server::{
        data::{
            deleted_message::DeletedMessageRepository,
            designation::DesignatedRoleRepository,
            discord::{
                DiscordGuildChannelRepository, DiscordGuildRepository, DiscordGuildRoleRepository,
                DiscordUserRepository, GuildUserRoleRepository,
            },
            infraction::InfractionRepository,
            is_unique_violation,
            moderation_action::ModerationActionRepository,
        },
        error::{moderation::ModerationError, AppError},
        model::{
            authorization::AuthContext,
            infraction::{
                CreateInfractionParam, Infraction, InfractionSearchCriteria, ModerationActionParam,
                ModerationActionType,
            },
            message::{DeletedMessage, DeletedMessageBatch, DeletedMessageSearchCriteria},
            Paginated,
        },
        service::{
            discord::GuildActions,
            notification::{Notification, NotificationPublisher},
            rank,
        },
    },
};

pub const MAX_REASON_LENGTH: usize = 1000;
pub const MAX_CLEAN_COUNT: u64 = 100;

/// Longest mute or ban that can be given a duration. Longer ones should be
/// permanent.
pub const MAX_DURATION_DAYS: i64 = 365;

/// Reason recorded for messages removed by `clean_messages`.
pub const CLEAN_REASON: &str = "Mass-deleted";

/// Reason recorded when the expiry job rescinds an infraction.
pub const EXPIRED_REASON: &str = "Infraction expired";

pub struct ModerationService<'a> {
    db: &'a DatabaseConnection,
    actions: &'a dyn GuildActions,
    notifications: &'a NotificationPublisher,
}

impl<'a> ModerationService<'a> {
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

    /// Records an infraction against a user and applies its effect on Discord.
    ///
    /// # Arguments
    /// - `duration`: Only allowed for mutes and bans; the infraction expires
    ///   once it has elapsed
    ///
    /// # Returns
    /// - `Ok(Infraction)` - The recorded infraction
    /// - `Err(AuthError::MissingClaims)` - Caller lacks the claim for the type
    /// - `Err(ModerationError)` - Invalid reason or duration, self moderation,
    ///   outranked subject or an already active mute or ban
    pub async fn create_infraction(
        &self,
        ctx: &AuthContext,
        infraction_type: InfractionType,
        subject_id: u64,
        reason: &str,
        duration: Option<Duration>,
    ) -> Result<Infraction, AppError> {
        ctx.require_claims(&[claim_for(infraction_type)])?;

        let reason = validate_reason(reason)?;
        validate_duration(infraction_type, duration)?;

        if subject_id == ctx.user_id {
            return Err(ModerationError::SelfModeration.into());
        }

        self.ensure_outranks(ctx, subject_id).await?;

        if infraction_type.is_rescindable()
            && InfractionRepository::new(self.db)
                .find_active(ctx.guild_id, subject_id, infraction_type)
                .await?
                .is_some()
        {
            return Err(ModerationError::AlreadyActive(infraction_type).into());
        }

        self.ensure_user_mirrored(subject_id).await?;

        // Bans remove the shared guild, so the DM has to go out first
        if infraction_type != InfractionType::Notice {
            self.notify_subject(ctx.guild_id, subject_id, infraction_type, &reason)
                .await;
        }

        match infraction_type {
            InfractionType::Mute => {
                let mute_role_id = self.get_or_create_mute_role(ctx).await?;
                self.actions
                    .add_role(ctx.guild_id, subject_id, mute_role_id, &reason)
                    .await?;
            }
            InfractionType::Ban => {
                self.actions.ban(ctx.guild_id, subject_id, &reason).await?;
            }
            InfractionType::Notice | InfractionType::Warning => {}
        }

        let txn = self.db.begin().await?;
        let infraction_repo = InfractionRepository::new(&txn);

        // Another moderator may have recorded one since the check above
        if infraction_type.is_rescindable()
            && infraction_repo
                .find_active(ctx.guild_id, subject_id, infraction_type)
                .await?
                .is_some()
        {
            return Err(ModerationError::AlreadyActive(infraction_type).into());
        }

        let infraction = infraction_repo
            .create(CreateInfractionParam {
                guild_id: ctx.guild_id,
                infraction_type,
                reason,
                duration,
                subject_id,
                created_by_id: ctx.user_id,
            })
            .await
            .map_err(|e| -> AppError {
                if is_unique_violation(&e) {
                    ModerationError::AlreadyActive(infraction_type).into()
                } else {
                    e.into()
                }
            })?;
        ModerationActionRepository::new(&txn)
            .create(
                ModerationActionType::InfractionCreated,
                ModerationActionParam {
                    guild_id: ctx.guild_id,
                    created_by_id: ctx.user_id,
                    infraction_id: Some(infraction.id),
                    ..Default::default()
                },
            )
            .await?;

        txn.commit().await?;

        tracing::info!(
            "{} {} created infraction {} ({}) for {} in guild {}",
            if ctx.is_system { "System" } else { "User" },
            ctx.user_id,
            infraction.id,
            infraction.infraction_type,
            subject_id,
            ctx.guild_id
        );

        self.notifications.publish(Notification::InfractionCreated {
            infraction: infraction.clone(),
        });

        Ok(infraction)
    }

    /// Rescinds an active mute or ban and lifts it on Discord.
    pub async fn rescind_infraction(
        &self,
        ctx: &AuthContext,
        infraction_id: i32,
        reason: Option<String>,
    ) -> Result<Infraction, AppError> {
        ctx.require_claims(&[AuthorizationClaim::ModerationRescind])?;

        let infraction = InfractionRepository::new(self.db)
            .find_by_id(ctx.guild_id, infraction_id)
            .await?
            .filter(|infraction| infraction.deleted_at.is_none())
            .ok_or(ModerationError::InfractionNotFound(infraction_id))?;

        if infraction.rescinded_at.is_some() {
            return Err(ModerationError::AlreadyRescinded(infraction_id).into());
        }
        if !infraction.infraction_type.is_rescindable() {
            return Err(ModerationError::NotRescindable(infraction.infraction_type).into());
        }

        let reason = reason
            .map(|reason| validate_reason(&reason))
            .transpose()?;

        self.rescind(infraction, ctx.user_id, reason).await
    }

    /// Rescinds the subject's active infraction of the given type, as `unmute`
    /// and `unban` do.
    pub async fn rescind_active(
        &self,
        ctx: &AuthContext,
        subject_id: u64,
        infraction_type: InfractionType,
    ) -> Result<Infraction, AppError> {
        ctx.require_claims(&[AuthorizationClaim::ModerationRescind])?;

        let infraction = InfractionRepository::new(self.db)
            .find_active(ctx.guild_id, subject_id, infraction_type)
            .await?
            .ok_or(ModerationError::NoActiveInfraction(infraction_type))?;

        self.rescind(infraction, ctx.user_id, None).await
    }

    /// Soft deletes an infraction, lifting it on Discord when still active.
    pub async fn delete_infraction(
        &self,
        ctx: &AuthContext,
        infraction_id: i32,
    ) -> Result<Infraction, AppError> {
        ctx.require_claims(&[AuthorizationClaim::ModerationDelete])?;

        let infraction = InfractionRepository::new(self.db)
            .find_by_id(ctx.guild_id, infraction_id)
            .await?
            .filter(|infraction| infraction.deleted_at.is_none())
            .ok_or(ModerationError::InfractionNotFound(infraction_id))?;

        let txn = self.db.begin().await?;

        let deleted = InfractionRepository::new(&txn)
            .delete(infraction.id, ctx.user_id)
            .await?
            .ok_or(ModerationError::InfractionNotFound(infraction_id))?;
        ModerationActionRepository::new(&txn)
            .create(
                ModerationActionType::InfractionDeleted,
                ModerationActionParam {
                    guild_id: ctx.guild_id,
                    created_by_id: ctx.user_id,
                    infraction_id: Some(infraction.id),
                    ..Default::default()
                },
            )
            .await?;

        txn.commit().await?;

        // Still in effect unless it had been rescinded before the delete
        if deleted.rescinded_at.is_none() && deleted.infraction_type.is_rescindable() {
            self.lift_effect(&deleted, "Infraction deleted").await;
        }

        self.notifications.publish(Notification::InfractionDeleted {
            infraction: deleted.clone(),
            deleted_by_id: ctx.user_id,
        });

        Ok(deleted)
    }

    /// Rescinds every active mute and ban whose duration has elapsed by `now`.
    ///
    /// Claims and ranks are not checked. A failure is logged and the sweep
    /// carries on with the next infraction.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of infractions rescinded
    pub async fn auto_rescind_expired(
        &self,
        now: DateTime<Utc>,
        actor_id: u64,
    ) -> Result<usize, AppError> {
        let expired = InfractionRepository::new(self.db).get_expired(now).await?;
        let mut rescinded = 0;

        for infraction in expired {
            let id = infraction.id;

            match self
                .rescind(infraction, actor_id, Some(EXPIRED_REASON.to_string()))
                .await
            {
                Ok(_) => rescinded += 1,
                Err(AppError::ModerationErr(ModerationError::AlreadyRescinded(_))) => {
                    tracing::debug!("Expired infraction {} was rescinded meanwhile", id)
                }
                Err(e) => tracing::error!("Failed to rescind expired infraction {}: {}", id, e),
            }
        }

        if rescinded > 0 {
            tracing::info!("Rescinded {} expired infractions", rescinded);
        }

        Ok(rescinded)
    }

    /// Searches the guild's infractions, newest first.
    pub async fn search_infractions(
        &self,
        ctx: &AuthContext,
        criteria: &InfractionSearchCriteria,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Infraction>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::ModerationRead])?;

        Ok(InfractionRepository::new(self.db)
            .search(ctx.guild_id, criteria, page, per_page)
            .await?)
    }

    pub async fn get_infraction_counts(
        &self,
        guild_id: u64,
        subject_id: u64,
    ) -> Result<InfractionCountsDto, AppError> {
        Ok(InfractionRepository::new(self.db)
            .count_by_type(guild_id, subject_id)
            .await?)
    }

    /// Deletes a single message and keeps its content.
    pub async fn delete_message(
        &self,
        ctx: &AuthContext,
        channel_id: u64,
        message_id: u64,
        reason: &str,
    ) -> Result<DeletedMessage, AppError> {
        ctx.require_claims(&[AuthorizationClaim::ModerationDeleteMessage])?;

        let reason = validate_reason(reason)?;

        let message = self
            .actions
            .fetch_message(channel_id, message_id)
            .await
            .map_err(|_| ModerationError::MessageNotFound(message_id))?;

        self.actions
            .delete_message(channel_id, message_id, &reason)
            .await?;

        let txn = self.db.begin().await?;

        let deleted = DeletedMessageRepository::new(&txn)
            .create(ctx.guild_id, &message, &reason, ctx.user_id, None)
            .await?;
        ModerationActionRepository::new(&txn)
            .create(
                ModerationActionType::MessageDeleted,
                ModerationActionParam {
                    guild_id: ctx.guild_id,
                    created_by_id: ctx.user_id,
                    deleted_message_id: Some(message_id),
                    ..Default::default()
                },
            )
            .await?;

        txn.commit().await?;

        self.notifications.publish(Notification::MessagesDeleted {
            guild_id: ctx.guild_id,
            channel_id,
            deleted_by_id: ctx.user_id,
            batch_id: None,
            messages: vec![deleted.clone()],
        });

        Ok(deleted)
    }

    /// Deletes up to `count` of the channel's newest messages, optionally only
    /// those written by `author_id`, and records them as one batch.
    pub async fn clean_messages(
        &self,
        ctx: &AuthContext,
        channel_id: u64,
        count: u64,
        author_id: Option<u64>,
    ) -> Result<DeletedMessageBatch, AppError> {
        ctx.require_claims(&[AuthorizationClaim::ModerationMassDeleteMessages])?;

        if !(1..=MAX_CLEAN_COUNT).contains(&count) {
            return Err(ModerationError::InvalidCleanCount {
                count,
                max: MAX_CLEAN_COUNT,
            }
            .into());
        }

        let messages: Vec<_> = self
            .actions
            .recent_messages(channel_id, count as u8)
            .await?
            .into_iter()
            .filter(|message| author_id.is_none_or(|author| message.author_id == author))
            .collect();

        let message_ids: Vec<u64> = messages.iter().map(|m| m.message_id).collect();
        self.actions.delete_messages(channel_id, &message_ids).await?;

        let txn = self.db.begin().await?;
        let message_repo = DeletedMessageRepository::new(&txn);

        let mut batch = message_repo
            .create_batch(ctx.guild_id, channel_id, ctx.user_id)
            .await?;
        let mut deleted = Vec::with_capacity(messages.len());
        for message in &messages {
            deleted.push(
                message_repo
                    .create(ctx.guild_id, message, CLEAN_REASON, ctx.user_id, Some(batch.id))
                    .await?,
            );
        }
        ModerationActionRepository::new(&txn)
            .create(
                ModerationActionType::MessageBatchDeleted,
                ModerationActionParam {
                    guild_id: ctx.guild_id,
                    created_by_id: ctx.user_id,
                    deleted_message_batch_id: Some(batch.id),
                    ..Default::default()
                },
            )
            .await?;

        txn.commit().await?;

        batch.message_count = deleted.len();

        self.notifications.publish(Notification::MessagesDeleted {
            guild_id: ctx.guild_id,
            channel_id,
            deleted_by_id: ctx.user_id,
            batch_id: Some(batch.id),
            messages: deleted,
        });

        Ok(batch)
    }

    /// Searches messages deleted by moderators, newest first.
    pub async fn search_deleted_messages(
        &self,
        ctx: &AuthContext,
        criteria: &DeletedMessageSearchCriteria,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<DeletedMessage>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::LogViewDeletedMessages])?;

        Ok(DeletedMessageRepository::new(self.db)
            .search(ctx.guild_id, criteria, page, per_page)
            .await?)
    }

    async fn rescind(
        &self,
        infraction: Infraction,
        rescinded_by_id: u64,
        reason: Option<String>,
    ) -> Result<Infraction, AppError> {
        let lift_reason = reason
            .clone()
            .unwrap_or_else(|| "Infraction rescinded".to_string());

        let txn = self.db.begin().await?;

        let rescinded = InfractionRepository::new(&txn)
            .rescind(infraction.id, rescinded_by_id, reason)
            .await?
            .ok_or(ModerationError::AlreadyRescinded(infraction.id))?;
        ModerationActionRepository::new(&txn)
            .create(
                ModerationActionType::InfractionRescinded,
                ModerationActionParam {
                    guild_id: infraction.guild_id,
                    created_by_id: rescinded_by_id,
                    infraction_id: Some(infraction.id),
                    ..Default::default()
                },
            )
            .await?;

        txn.commit().await?;

        self.lift_effect(&rescinded, &lift_reason).await;

        self.notifications.publish(Notification::InfractionRescinded {
            infraction: rescinded.clone(),
        });

        Ok(rescinded)
    }

    /// Removes the mute role or ban behind an infraction.
    ///
    /// The subject may have left or been unbanned by hand, so failures are
    /// logged and the infraction is still rescinded.
    async fn lift_effect(&self, infraction: &Infraction, reason: &str) {
        let (guild_id, subject_id) = (infraction.guild_id, infraction.subject_id);

        match infraction.infraction_type {
            InfractionType::Mute => {
                let mute_roles = match DesignatedRoleRepository::new(self.db)
                    .get_role_ids(guild_id, DesignatedRoleType::ModerationMute)
                    .await
                {
                    Ok(roles) => roles,
                    Err(e) => {
                        tracing::warn!("Failed to get mute roles of guild {}: {}", guild_id, e);
                        return;
                    }
                };

                for role_id in mute_roles {
                    if let Err(e) = self
                        .actions
                        .remove_role(guild_id, subject_id, role_id, reason)
                        .await
                    {
                        tracing::warn!(
                            "Failed to remove mute role {} from {} in guild {}: {}",
                            role_id,
                            subject_id,
                            guild_id,
                            e
                        );
                    }
                }
            }
            InfractionType::Ban => {
                if let Err(e) = self.actions.unban(guild_id, subject_id, reason).await {
                    tracing::warn!("Failed to unban {} in guild {}: {}", subject_id, guild_id, e);
                }
            }
            InfractionType::Notice | InfractionType::Warning => {}
        }
    }

    /// Fails with `Outranked` unless the caller's highest rank is above the subject's.
    async fn ensure_outranks(&self, ctx: &AuthContext, subject_id: u64) -> Result<(), AppError> {
        if ctx.is_system {
            return Ok(());
        }

        let ranks = rank::get_rank_roles(self.db, ctx.guild_id).await?;
        if ranks.is_empty() {
            return Ok(());
        }

        let subject_roles = GuildUserRoleRepository::new(self.db)
            .get_role_ids(ctx.guild_id, subject_id)
            .await?;

        let moderator_rank = rank::highest_rank(&ranks, &ctx.role_ids).map(|r| r.position);
        let subject_rank = rank::highest_rank(&ranks, &subject_roles).map(|r| r.position);

        if rank::outranks(moderator_rank, subject_rank) {
            Ok(())
        } else {
            Err(ModerationError::Outranked.into())
        }
    }

    /// Fetches and mirrors a user the bot has never seen, e.g. when banning
    /// someone who is not in the guild.
    async fn ensure_user_mirrored(&self, user_id: u64) -> Result<(), AppError> {
        let user_repo = DiscordUserRepository::new(self.db);

        if user_repo.find_by_id(user_id).await?.is_none() {
            let user = self.actions.fetch_user(user_id).await?;
            user_repo.upsert(&user).await?;
        }

        Ok(())
    }

    /// Gets the guild's designated mute role, creating and designating one
    /// when there is none.
    async fn get_or_create_mute_role(&self, ctx: &AuthContext) -> Result<u64, AppError> {
        let designation_repo = DesignatedRoleRepository::new(self.db);

        let existing = designation_repo
            .get_role_ids(ctx.guild_id, DesignatedRoleType::ModerationMute)
            .await?;
        if let Some(role_id) = existing.first() {
            return Ok(*role_id);
        }

        let channel_ids: Vec<u64> = DiscordGuildChannelRepository::new(self.db)
            .get_by_guild_id(ctx.guild_id)
            .await?
            .into_iter()
            .map(|channel| channel.channel_id)
            .collect();

        let role = self
            .actions
            .create_mute_role(ctx.guild_id, &channel_ids)
            .await?;

        DiscordGuildRoleRepository::new(self.db)
            .upsert(ctx.guild_id, &role)
            .await?;
        designation_repo
            .create(
                ctx.guild_id,
                role.id.get(),
                DesignatedRoleType::ModerationMute,
                ctx.user_id,
            )
            .await?;

        tracing::info!(
            "Created mute role {} in guild {}",
            role.id.get(),
            ctx.guild_id
        );

        Ok(role.id.get())
    }

    async fn notify_subject(
        &self,
        guild_id: u64,
        subject_id: u64,
        infraction_type: InfractionType,
        reason: &str,
    ) {
        let guild_name = match DiscordGuildRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await
        {
            Ok(Some(guild)) => guild.name,
            _ => "the server".to_string(),
        };

        let verb = match infraction_type {
            InfractionType::Notice => return,
            InfractionType::Warning => "warned",
            InfractionType::Mute => "muted",
            InfractionType::Ban => "banned",
        };

        let content = format!(
            "You have been {} in **{}**. Reason: {}",
            verb, guild_name, reason
        );

        if let Err(e) = self.actions.send_dm(subject_id, &content).await {
            tracing::debug!("Could not DM {} about their infraction: {}", subject_id, e);
        }
    }
}

fn claim_for(infraction_type: InfractionType) -> AuthorizationClaim {
    match infraction_type {
        InfractionType::Notice => AuthorizationClaim::ModerationNote,
        InfractionType::Warning => AuthorizationClaim::ModerationWarn,
        InfractionType::Mute => AuthorizationClaim::ModerationMute,
        InfractionType::Ban => AuthorizationClaim::ModerationBan,
    }
}

/// Trims the reason and checks its length in characters.
fn validate_reason(reason: &str) -> Result<String, ModerationError> {
    let reason = reason.trim();
    let length = reason.chars().count();

    if length == 0 || length > MAX_REASON_LENGTH {
        return Err(ModerationError::InvalidReason {
            max: MAX_REASON_LENGTH,
        });
    }

    Ok(reason.to_string())
}

fn max_duration() -> Duration {
    Duration::days(MAX_DURATION_DAYS)
}

fn validate_duration(
    infraction_type: InfractionType,
    duration: Option<Duration>,
) -> Result<(), ModerationError> {
    match duration {
        None => Ok(()),
        Some(_) if !infraction_type.is_rescindable() => {
            Err(ModerationError::DurationNotAllowed(infraction_type))
        }
        Some(duration) if duration <= Duration::zero() || duration > max_duration() => {
            Err(ModerationError::InvalidDuration {
                max_days: MAX_DURATION_DAYS,
            })
        }
        Some(_) => Ok(()),
    }
}
