//! Member role assignment repository.

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use crate::server::util::parse::parse_snowflake;

pub struct GuildUserRoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuildUserRoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces the member's stored roles with `role_ids`.
    pub async fn sync_user_roles(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
    ) -> Result<(), DbErr> {
        entity::prelude::GuildUserRole::delete_many()
            .filter(entity::guild_user_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user_role::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        if role_ids.is_empty() {
            return Ok(());
        }

        let models = role_ids.iter().map(|role_id| entity::guild_user_role::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            ..Default::default()
        });

        entity::prelude::GuildUserRole::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Assigns a role to the member if not already assigned.
    pub async fn add(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), DbErr> {
        if self.has_role(guild_id, user_id, role_id).await? {
            return Ok(());
        }

        entity::prelude::GuildUserRole::insert(entity::guild_user_role::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            role_id: ActiveValue::Set(role_id.to_string()),
            ..Default::default()
        })
        .exec(self.db)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), DbErr> {
        entity::prelude::GuildUserRole::delete_many()
            .filter(entity::guild_user_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user_role::Column::UserId.eq(user_id.to_string()))
            .filter(entity::guild_user_role::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn has_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::GuildUserRole::find()
            .filter(entity::guild_user_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user_role::Column::UserId.eq(user_id.to_string()))
            .filter(entity::guild_user_role::Column::RoleId.eq(role_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_role_ids(&self, guild_id: u64, user_id: u64) -> Result<Vec<u64>, DbErr> {
        let role_ids: Vec<String> = entity::prelude::GuildUserRole::find()
            .select_only()
            .column(entity::guild_user_role::Column::RoleId)
            .filter(entity::guild_user_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user_role::Column::UserId.eq(user_id.to_string()))
            .into_tuple()
            .all(self.db)
            .await?;

        role_ids
            .iter()
            .map(|id| parse_snowflake(id, "role_id"))
            .collect()
    }
}
