//! Channel and role designation repositories.
//!
//! Designations are soft deleted so the audit trail keeps who unassigned them.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::{
    model::designation::{DesignatedChannelType, DesignatedRoleType},
    server::{
        model::designation::{DesignatedChannelMapping, DesignatedRoleMapping},
        util::parse::parse_snowflake,
    },
};

pub struct DesignatedChannelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DesignatedChannelRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        guild_id: u64,
        channel_id: u64,
        designation: DesignatedChannelType,
        created_by_id: u64,
    ) -> Result<DesignatedChannelMapping, DbErr> {
        let entity = entity::designated_channel_mapping::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
            designation: ActiveValue::Set(designation.as_ref().to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            deleted_by_id: ActiveValue::Set(None),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DesignatedChannelMapping::from_entity(entity)
    }

    /// Soft deletes an active designation in the guild.
    ///
    /// # Returns
    /// - `Ok(true)` if an active designation was deleted
    /// - `Ok(false)` if no active designation with that id exists in the guild
    pub async fn delete(&self, guild_id: u64, id: i32, deleted_by_id: u64) -> Result<bool, DbErr> {
        let existing = entity::prelude::DesignatedChannelMapping::find_by_id(id)
            .filter(entity::designated_channel_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::designated_channel_mapping::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: entity::designated_channel_mapping::ActiveModel = existing.into();
        active.deleted_by_id = ActiveValue::Set(Some(deleted_by_id.to_string()));
        active.deleted_at = ActiveValue::Set(Some(Utc::now()));
        active.update(self.db).await?;

        Ok(true)
    }

    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<DesignatedChannelMapping>, DbErr> {
        entity::prelude::DesignatedChannelMapping::find()
            .filter(entity::designated_channel_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::designated_channel_mapping::Column::DeletedAt.is_null())
            .order_by_asc(entity::designated_channel_mapping::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DesignatedChannelMapping::from_entity)
            .collect()
    }

    /// Gets ids of channels holding the designation.
    pub async fn get_channel_ids(
        &self,
        guild_id: u64,
        designation: DesignatedChannelType,
    ) -> Result<Vec<u64>, DbErr> {
        let ids: Vec<String> = entity::prelude::DesignatedChannelMapping::find()
            .select_only()
            .column(entity::designated_channel_mapping::Column::ChannelId)
            .filter(entity::designated_channel_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(
                entity::designated_channel_mapping::Column::Designation.eq(designation.as_ref()),
            )
            .filter(entity::designated_channel_mapping::Column::DeletedAt.is_null())
            .into_tuple()
            .all(self.db)
            .await?;

        ids.iter()
            .map(|id| parse_snowflake(id, "channel_id"))
            .collect()
    }

    pub async fn exists(
        &self,
        guild_id: u64,
        channel_id: u64,
        designation: DesignatedChannelType,
    ) -> Result<bool, DbErr> {
        let channels = self.get_channel_ids(guild_id, designation).await?;
        Ok(channels.contains(&channel_id))
    }
}

pub struct DesignatedRoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DesignatedRoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        guild_id: u64,
        role_id: u64,
        designation: DesignatedRoleType,
        created_by_id: u64,
    ) -> Result<DesignatedRoleMapping, DbErr> {
        let entity = entity::designated_role_mapping::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            designation: ActiveValue::Set(designation.as_ref().to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            deleted_by_id: ActiveValue::Set(None),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DesignatedRoleMapping::from_entity(entity)
    }

    /// Soft deletes an active designation in the guild, returning whether one was found.
    pub async fn delete(&self, guild_id: u64, id: i32, deleted_by_id: u64) -> Result<bool, DbErr> {
        let existing = entity::prelude::DesignatedRoleMapping::find_by_id(id)
            .filter(entity::designated_role_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::designated_role_mapping::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: entity::designated_role_mapping::ActiveModel = existing.into();
        active.deleted_by_id = ActiveValue::Set(Some(deleted_by_id.to_string()));
        active.deleted_at = ActiveValue::Set(Some(Utc::now()));
        active.update(self.db).await?;

        Ok(true)
    }

    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<DesignatedRoleMapping>, DbErr> {
        entity::prelude::DesignatedRoleMapping::find()
            .filter(entity::designated_role_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::designated_role_mapping::Column::DeletedAt.is_null())
            .order_by_asc(entity::designated_role_mapping::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DesignatedRoleMapping::from_entity)
            .collect()
    }

    /// Gets ids of roles holding the designation.
    pub async fn get_role_ids(
        &self,
        guild_id: u64,
        designation: DesignatedRoleType,
    ) -> Result<Vec<u64>, DbErr> {
        let ids: Vec<String> = entity::prelude::DesignatedRoleMapping::find()
            .select_only()
            .column(entity::designated_role_mapping::Column::RoleId)
            .filter(entity::designated_role_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::designated_role_mapping::Column::Designation.eq(designation.as_ref()))
            .filter(entity::designated_role_mapping::Column::DeletedAt.is_null())
            .into_tuple()
            .all(self.db)
            .await?;

        ids.iter().map(|id| parse_snowflake(id, "role_id")).collect()
    }

    pub async fn exists(
        &self,
        guild_id: u64,
        role_id: u64,
        designation: DesignatedRoleType,
    ) -> Result<bool, DbErr> {
        let roles = self.get_role_ids(guild_id, designation).await?;
        Ok(roles.contains(&role_id))
    }
}
