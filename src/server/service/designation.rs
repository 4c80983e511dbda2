use sea_orm::DatabaseConnection;

use crate::{
    model::{
        authorization::AuthorizationClaim,
        designation::{DesignatedChannelType, DesignatedRoleType},
    },
    server::{
        data::{
            designation::{DesignatedChannelRepository, DesignatedRoleRepository},
            discord::{DiscordGuildChannelRepository, DiscordGuildRoleRepository},
        },
        error::AppError,
        model::{
            authorization::AuthContext,
            designation::{DesignatedChannelMapping, DesignatedRoleMapping},
        },
    },
};

pub struct DesignationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DesignationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Designates a mirrored channel of the guild for a purpose.
    ///
    /// # Returns
    /// - `Ok(DesignatedChannelMapping)` - The new designation
    /// - `Err(AppError::NotFound)` - Channel is not a mirrored channel of the guild
    /// - `Err(AppError::Conflict)` - Channel already holds the designation
    pub async fn add_designated_channel(
        &self,
        ctx: &AuthContext,
        channel_id: u64,
        designation: DesignatedChannelType,
    ) -> Result<DesignatedChannelMapping, AppError> {
        ctx.require_claims(&[AuthorizationClaim::DesignatedChannelMappingCreate])?;

        let channel = DiscordGuildChannelRepository::new(self.db)
            .find_by_id(channel_id)
            .await?;
        if !channel.is_some_and(|c| c.guild_id == ctx.guild_id) {
            return Err(AppError::NotFound(format!(
                "Channel {} not found in this guild",
                channel_id
            )));
        }

        let mapping_repo = DesignatedChannelRepository::new(self.db);
        if mapping_repo
            .exists(ctx.guild_id, channel_id, designation)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Channel {} is already designated as {}",
                channel_id, designation
            )));
        }

        Ok(mapping_repo
            .create(ctx.guild_id, channel_id, designation, ctx.user_id)
            .await?)
    }

    pub async fn remove_designated_channel(
        &self,
        ctx: &AuthContext,
        mapping_id: i32,
    ) -> Result<(), AppError> {
        ctx.require_claims(&[AuthorizationClaim::DesignatedChannelMappingDelete])?;

        let deleted = DesignatedChannelRepository::new(self.db)
            .delete(ctx.guild_id, mapping_id, ctx.user_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound(format!(
                "Channel designation {} not found",
                mapping_id
            )));
        }

        Ok(())
    }

    pub async fn get_designated_channels(
        &self,
        ctx: &AuthContext,
    ) -> Result<Vec<DesignatedChannelMapping>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::DesignatedChannelMappingRead])?;

        Ok(DesignatedChannelRepository::new(self.db)
            .get_by_guild(ctx.guild_id)
            .await?)
    }

    /// Ids of the guild's channels holding the designation. No claim required.
    pub async fn channels_for(
        &self,
        guild_id: u64,
        designation: DesignatedChannelType,
    ) -> Result<Vec<u64>, AppError> {
        Ok(DesignatedChannelRepository::new(self.db)
            .get_channel_ids(guild_id, designation)
            .await?)
    }

    pub async fn channel_has(
        &self,
        guild_id: u64,
        channel_id: u64,
        designation: DesignatedChannelType,
    ) -> Result<bool, AppError> {
        Ok(DesignatedChannelRepository::new(self.db)
            .exists(guild_id, channel_id, designation)
            .await?)
    }

    /// Designates a mirrored role of the guild for a purpose.
    pub async fn add_designated_role(
        &self,
        ctx: &AuthContext,
        role_id: u64,
        designation: DesignatedRoleType,
    ) -> Result<DesignatedRoleMapping, AppError> {
        ctx.require_claims(&[AuthorizationClaim::DesignatedRoleMappingCreate])?;

        let role = DiscordGuildRoleRepository::new(self.db)
            .find_by_id(role_id)
            .await?;
        if !role.is_some_and(|r| r.guild_id == ctx.guild_id) {
            return Err(AppError::NotFound(format!(
                "Role {} not found in this guild",
                role_id
            )));
        }

        let mapping_repo = DesignatedRoleRepository::new(self.db);
        if mapping_repo.exists(ctx.guild_id, role_id, designation).await? {
            return Err(AppError::Conflict(format!(
                "Role {} is already designated as {}",
                role_id, designation
            )));
        }

        Ok(mapping_repo
            .create(ctx.guild_id, role_id, designation, ctx.user_id)
            .await?)
    }

    pub async fn remove_designated_role(
        &self,
        ctx: &AuthContext,
        mapping_id: i32,
    ) -> Result<(), AppError> {
        ctx.require_claims(&[AuthorizationClaim::DesignatedRoleMappingDelete])?;

        let deleted = DesignatedRoleRepository::new(self.db)
            .delete(ctx.guild_id, mapping_id, ctx.user_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound(format!(
                "Role designation {} not found",
                mapping_id
            )));
        }

        Ok(())
    }

    pub async fn get_designated_roles(
        &self,
        ctx: &AuthContext,
    ) -> Result<Vec<DesignatedRoleMapping>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::DesignatedRoleMappingRead])?;

        Ok(DesignatedRoleRepository::new(self.db)
            .get_by_guild(ctx.guild_id)
            .await?)
    }

    /// Ids of the guild's roles holding the designation. No claim required.
    pub async fn roles_for(
        &self,
        guild_id: u64,
        designation: DesignatedRoleType,
    ) -> Result<Vec<u64>, AppError> {
        Ok(DesignatedRoleRepository::new(self.db)
            .get_role_ids(guild_id, designation)
            .await?)
    }
}
