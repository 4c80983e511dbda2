use sea_orm::DatabaseConnection;
use serenity::all::Guild;

use crate::server::{
    data::discord::DiscordGuildRepository,
    error::AppError,
    model::discord::DiscordGuild,
    service::discord::{DiscordGuildChannelService, DiscordGuildRoleService, GuildMemberService},
};

pub struct DiscordGuildService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordGuildService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Mirrors a guild with its roles, channels and the members Discord sent
    /// along with it.
    ///
    /// Roles and channels that no longer exist are removed. A failure syncing
    /// one member is logged and does not stop the others.
    pub async fn sync_guild(&self, guild: &Guild) -> Result<DiscordGuild, AppError> {
        let guild_id = guild.id.get();
        let guild_repo = DiscordGuildRepository::new(self.db);

        let mirrored = guild_repo
            .upsert(
                guild_id,
                &guild.name,
                guild.icon.map(|icon| icon.to_string()),
                guild.owner_id.get(),
            )
            .await?;

        DiscordGuildRoleService::new(self.db)
            .update_roles(guild_id, &guild.roles)
            .await?;
        DiscordGuildChannelService::new(self.db)
            .update_channels(guild_id, &guild.channels)
            .await?;

        let member_service = GuildMemberService::new(self.db);
        for member in guild.members.values() {
            if let Err(e) = member_service.upsert_member(member).await {
                tracing::error!(
                    "Failed to sync member {} of guild {}: {}",
                    member.user.id,
                    guild_id,
                    e
                );
            }
        }

        tracing::info!(
            "Synced guild {} ({}) with {} members",
            guild.name,
            guild_id,
            guild.members.len()
        );

        Ok(mirrored)
    }

    /// Gets the guilds the user is currently a member of.
    pub async fn get_guilds_for_user(&self, user_id: u64) -> Result<Vec<DiscordGuild>, AppError> {
        let guild_repo = DiscordGuildRepository::new(self.db);

        Ok(guild_repo.get_guilds_for_user(user_id).await?)
    }
}
