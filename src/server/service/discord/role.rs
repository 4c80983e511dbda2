use sea_orm::DatabaseConnection;
use serenity::all::{Role, RoleId};
use std::collections::HashMap;

use crate::server::{
    data::discord::DiscordGuildRoleRepository, error::AppError,
    model::discord::DiscordGuildRole,
};

pub struct DiscordGuildRoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DiscordGuildRoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the mirrored roles of a guild with the given set.
    pub async fn update_roles(
        &self,
        guild_id: u64,
        guild_roles: &HashMap<RoleId, Role>,
    ) -> Result<(), AppError> {
        let role_repo = DiscordGuildRoleRepository::new(self.db);

        role_repo.sync_guild_roles(guild_id, guild_roles).await?;

        tracing::debug!("Updated {} roles for guild {}", guild_roles.len(), guild_id);

        Ok(())
    }

    pub async fn upsert(&self, guild_id: u64, role: &Role) -> Result<DiscordGuildRole, AppError> {
        let role_repo = DiscordGuildRoleRepository::new(self.db);

        Ok(role_repo.upsert(guild_id, role).await?)
    }

    pub async fn delete(&self, role_id: u64) -> Result<(), AppError> {
        let role_repo = DiscordGuildRoleRepository::new(self.db);

        role_repo.delete(role_id).await?;

        Ok(())
    }

    /// Gets the guild's roles, highest position first.
    pub async fn get_roles(&self, guild_id: u64) -> Result<Vec<DiscordGuildRole>, AppError> {
        let role_repo = DiscordGuildRoleRepository::new(self.db);

        Ok(role_repo.get_by_guild_id(guild_id).await?)
    }
}
