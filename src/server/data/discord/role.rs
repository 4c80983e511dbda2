//! Discord guild role repository for database operations.
//!
//! Role data is synced from Discord via Serenity and stored locally for rank
//! comparisons, claim resolution and display purposes.

use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serenity::all::{Role, RoleId};
use std::collections::HashMap;

use crate::server::model::discord::DiscordGuildRole;

/// Repository for Discord guild role database operations.
pub struct DiscordGuildRoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DiscordGuildRoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Upserts a Discord guild role (insert or update if exists).
    ///
    /// Updates name, color, position and permissions if the role already exists.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID that owns this role
    /// - `role` - Serenity role object containing role data from Discord
    pub async fn upsert(&self, guild_id: u64, role: &Role) -> Result<DiscordGuildRole, DbErr> {
        let entity =
            entity::prelude::DiscordGuildRole::insert(entity::discord_guild_role::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                role_id: ActiveValue::Set(role.id.get().to_string()),
                name: ActiveValue::Set(role.name.clone()),
                color: ActiveValue::Set(format!("#{:06X}", role.colour.0)),
                position: ActiveValue::Set(i32::from(role.position)),
                permissions: ActiveValue::Set(role.permissions.bits().to_string()),
            })
            .on_conflict(
                OnConflict::column(entity::discord_guild_role::Column::RoleId)
                    .update_columns([
                        entity::discord_guild_role::Column::Name,
                        entity::discord_guild_role::Column::Color,
                        entity::discord_guild_role::Column::Position,
                        entity::discord_guild_role::Column::Permissions,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        DiscordGuildRole::from_entity(entity)
    }

    /// Upserts every role of a guild, then removes stored roles Discord no longer has.
    pub async fn sync_guild_roles(
        &self,
        guild_id: u64,
        roles: &HashMap<RoleId, Role>,
    ) -> Result<Vec<DiscordGuildRole>, DbErr> {
        let mut results = Vec::new();

        for role in roles.values() {
            results.push(self.upsert(guild_id, role).await?);
        }

        let keep: Vec<String> = roles.keys().map(|id| id.get().to_string()).collect();
        entity::prelude::DiscordGuildRole::delete_many()
            .filter(entity::discord_guild_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::discord_guild_role::Column::RoleId.is_not_in(keep))
            .exec(self.db)
            .await?;

        Ok(results)
    }

    /// Deletes a Discord guild role by role ID.
    ///
    /// Member role assignments and role designations referencing the role are
    /// removed through cascading foreign keys.
    pub async fn delete(&self, role_id: u64) -> Result<(), DbErr> {
        entity::prelude::DiscordGuildRole::delete_many()
            .filter(entity::discord_guild_role::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, role_id: u64) -> Result<Option<DiscordGuildRole>, DbErr> {
        entity::prelude::DiscordGuildRole::find_by_id(role_id.to_string())
            .one(self.db)
            .await?
            .map(DiscordGuildRole::from_entity)
            .transpose()
    }

    /// Gets all roles for a guild, highest position first.
    pub async fn get_by_guild_id(&self, guild_id: u64) -> Result<Vec<DiscordGuildRole>, DbErr> {
        entity::prelude::DiscordGuildRole::find()
            .filter(entity::discord_guild_role::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::discord_guild_role::Column::Position)
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordGuildRole::from_entity)
            .collect()
    }

    /// Gets the stored roles among `role_ids`, highest position first.
    pub async fn get_by_ids(&self, role_ids: &[u64]) -> Result<Vec<DiscordGuildRole>, DbErr> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

        entity::prelude::DiscordGuildRole::find()
            .filter(entity::discord_guild_role::Column::RoleId.is_in(ids))
            .order_by_desc(entity::discord_guild_role::Column::Position)
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordGuildRole::from_entity)
            .collect()
    }
}
