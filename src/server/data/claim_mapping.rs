//! Claim mapping repository.
//!
//! Mappings are never deleted. Removing a grant or denial sets `rescinded_at`,
//! so only rows with `rescinded_at IS NULL` take part in claim resolution.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::authorization::{AuthorizationClaim, ClaimMappingType},
    server::model::authorization::{ClaimMapping, ClaimTarget},
};

pub struct ClaimMappingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ClaimMappingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        guild_id: u64,
        target: ClaimTarget,
        claim: AuthorizationClaim,
        mapping_type: ClaimMappingType,
        created_by_id: u64,
    ) -> Result<ClaimMapping, DbErr> {
        let (role_id, user_id) = match target {
            ClaimTarget::Role(id) => (Some(id.to_string()), None),
            ClaimTarget::User(id) => (None, Some(id.to_string())),
        };

        let entity = entity::claim_mapping::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            mapping_type: ActiveValue::Set(mapping_type.as_ref().to_string()),
            role_id: ActiveValue::Set(role_id),
            user_id: ActiveValue::Set(user_id),
            claim: ActiveValue::Set(claim.as_ref().to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            rescinded_by_id: ActiveValue::Set(None),
            rescinded_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ClaimMapping::from_entity(entity)
    }

    /// Marks a mapping as rescinded. Already rescinded mappings are left as is.
    pub async fn rescind(&self, id: i32, rescinded_by_id: u64) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::ClaimMapping::find_by_id(id).one(self.db).await?
        else {
            return Ok(());
        };

        if existing.rescinded_at.is_some() {
            return Ok(());
        }

        let mut active: entity::claim_mapping::ActiveModel = existing.into();
        active.rescinded_by_id = ActiveValue::Set(Some(rescinded_by_id.to_string()));
        active.rescinded_at = ActiveValue::Set(Some(Utc::now()));
        active.update(self.db).await?;

        Ok(())
    }

    /// Gets every active mapping in the guild ordered by creation.
    pub async fn get_active_by_guild(&self, guild_id: u64) -> Result<Vec<ClaimMapping>, DbErr> {
        entity::prelude::ClaimMapping::find()
            .filter(entity::claim_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::claim_mapping::Column::RescindedAt.is_null())
            .order_by_asc(entity::claim_mapping::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ClaimMapping::from_entity)
            .collect()
    }

    /// Gets active mappings that target the user directly or any of their roles.
    pub async fn get_active_for_user(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
    ) -> Result<Vec<ClaimMapping>, DbErr> {
        let role_ids: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

        let mut targets =
            Condition::any().add(entity::claim_mapping::Column::UserId.eq(user_id.to_string()));
        if !role_ids.is_empty() {
            targets = targets.add(entity::claim_mapping::Column::RoleId.is_in(role_ids));
        }

        entity::prelude::ClaimMapping::find()
            .filter(entity::claim_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::claim_mapping::Column::RescindedAt.is_null())
            .filter(targets)
            .all(self.db)
            .await?
            .into_iter()
            .map(ClaimMapping::from_entity)
            .collect()
    }

    /// Gets active mappings for a single role or user.
    pub async fn get_active_for_target(
        &self,
        guild_id: u64,
        target: ClaimTarget,
    ) -> Result<Vec<ClaimMapping>, DbErr> {
        let query = entity::prelude::ClaimMapping::find()
            .filter(entity::claim_mapping::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::claim_mapping::Column::RescindedAt.is_null());

        let query = match target {
            ClaimTarget::Role(id) => {
                query.filter(entity::claim_mapping::Column::RoleId.eq(id.to_string()))
            }
            ClaimTarget::User(id) => {
                query.filter(entity::claim_mapping::Column::UserId.eq(id.to_string()))
            }
        };

        query
            .order_by_asc(entity::claim_mapping::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ClaimMapping::from_entity)
            .collect()
    }

    /// Whether the guild has ever had a mapping, rescinded or not.
    pub async fn any_exist(&self, guild_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::ClaimMapping::find()
            .filter(entity::claim_mapping::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
