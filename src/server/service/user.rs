//! User lookups for the `info` command and the web API.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::authorization::AuthorizationClaim,
    server::{
        data::{
            discord::{
                DiscordGuildChannelRepository, DiscordGuildRoleRepository, DiscordMessageRepository,
                DiscordUserRepository, GuildUserRepository, GuildUserRoleRepository,
            },
            infraction::InfractionRepository,
        },
        error::AppError,
        model::{
            authorization::AuthContext,
            discord::{DiscordUser, GuildUser},
            user::UserInfo,
        },
        service::discord::GuildMemberService,
    },
};

/// Window of message activity shown in user info.
pub const MESSAGE_ACTIVITY_DAYS: i64 = 30;

pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, user_id: u64) -> Result<Option<DiscordUser>, AppError> {
        Ok(DiscordUserRepository::new(self.db).find_by_id(user_id).await?)
    }

    /// Collects what is known about a user in the caller's guild.
    ///
    /// Infraction counts are only included when the caller holds `ModerationRead`.
    ///
    /// # Returns
    /// - `Ok(UserInfo)` - Profile, membership, roles and recent message activity
    /// - `Err(AppError::NotFound)` - The user has never been seen by the bot
    pub async fn get_user_info(&self, ctx: &AuthContext, user_id: u64) -> Result<UserInfo, AppError> {
        let user = DiscordUserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let membership = GuildUserRepository::new(self.db)
            .find(ctx.guild_id, user_id)
            .await?;

        let role_ids = GuildUserRoleRepository::new(self.db)
            .get_role_ids(ctx.guild_id, user_id)
            .await?;
        let mut roles = DiscordGuildRoleRepository::new(self.db)
            .get_by_ids(&role_ids)
            .await?;
        roles.sort_by(|a, b| b.position.cmp(&a.position).then(a.role_id.cmp(&b.role_id)));

        let since = Utc::now() - Duration::days(MESSAGE_ACTIVITY_DAYS);
        let message_counts = DiscordMessageRepository::new(self.db)
            .count_by_channel(ctx.guild_id, user_id, since)
            .await?;
        let channels = DiscordGuildChannelRepository::new(self.db)
            .get_by_guild_id(ctx.guild_id)
            .await?;

        let infraction_counts = if ctx.has_claim(AuthorizationClaim::ModerationRead) {
            Some(
                InfractionRepository::new(self.db)
                    .count_by_type(ctx.guild_id, user_id)
                    .await?,
            )
        } else {
            None
        };

        Ok(UserInfo {
            user,
            membership,
            roles,
            message_counts,
            channels,
            infraction_counts,
        })
    }

    /// Finds current members of the caller's guild by name.
    pub async fn search_users(
        &self,
        ctx: &AuthContext,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(DiscordUser, GuildUser)>, AppError> {
        GuildMemberService::new(self.db)
            .search_users(ctx.guild_id, query, limit)
            .await
    }
}
