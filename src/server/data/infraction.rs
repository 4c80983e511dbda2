//! Infraction repository.
//!
//! Rescinding and deleting are both recorded in place. Rescinded infractions
//! stay visible in searches; deleted ones are hidden unless asked for.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    model::infraction::{InfractionCountsDto, InfractionType},
    server::model::{
        infraction::{CreateInfractionParam, Infraction, InfractionSearchCriteria},
        Paginated,
    },
};

pub struct InfractionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InfractionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateInfractionParam) -> Result<Infraction, DbErr> {
        let created_at = Utc::now();
        let expires_at = match param.duration {
            Some(duration) => Some(created_at.checked_add_signed(duration).ok_or_else(|| {
                DbErr::Custom(format!("Infraction duration {} out of range", duration))
            })?),
            None => None,
        };

        let entity = entity::infraction::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            infraction_type: ActiveValue::Set(param.infraction_type.as_ref().to_string()),
            reason: ActiveValue::Set(param.reason),
            duration_secs: ActiveValue::Set(param.duration.map(|d| d.num_seconds())),
            expires_at: ActiveValue::Set(expires_at),
            subject_id: ActiveValue::Set(param.subject_id.to_string()),
            created_by_id: ActiveValue::Set(param.created_by_id.to_string()),
            created_at: ActiveValue::Set(created_at),
            rescinded_by_id: ActiveValue::Set(None),
            rescinded_at: ActiveValue::Set(None),
            rescind_reason: ActiveValue::Set(None),
            deleted_by_id: ActiveValue::Set(None),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Infraction::from_entity(entity)
    }

    /// Finds an infraction in the guild, including rescinded and deleted ones.
    pub async fn find_by_id(&self, guild_id: u64, id: i32) -> Result<Option<Infraction>, DbErr> {
        entity::prelude::Infraction::find_by_id(id)
            .filter(entity::infraction::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(Infraction::from_entity)
            .transpose()
    }

    /// Finds the subject's active infraction of the given type, newest first.
    pub async fn find_active(
        &self,
        guild_id: u64,
        subject_id: u64,
        infraction_type: InfractionType,
    ) -> Result<Option<Infraction>, DbErr> {
        entity::prelude::Infraction::find()
            .filter(entity::infraction::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::infraction::Column::SubjectId.eq(subject_id.to_string()))
            .filter(entity::infraction::Column::InfractionType.eq(infraction_type.as_ref()))
            .filter(entity::infraction::Column::RescindedAt.is_null())
            .filter(entity::infraction::Column::DeletedAt.is_null())
            .order_by_desc(entity::infraction::Column::CreatedAt)
            .one(self.db)
            .await?
            .map(Infraction::from_entity)
            .transpose()
    }

    /// Rescinds the infraction unless it is already rescinded or deleted.
    ///
    /// The check and the write are one statement, so of two concurrent
    /// rescinds only one gets `Some`.
    pub async fn rescind(
        &self,
        id: i32,
        rescinded_by_id: u64,
        reason: Option<String>,
    ) -> Result<Option<Infraction>, DbErr> {
        let result = entity::prelude::Infraction::update_many()
            .col_expr(
                entity::infraction::Column::RescindedById,
                Expr::value(rescinded_by_id.to_string()),
            )
            .col_expr(entity::infraction::Column::RescindedAt, Expr::value(Utc::now()))
            .col_expr(entity::infraction::Column::RescindReason, Expr::value(reason))
            .filter(entity::infraction::Column::Id.eq(id))
            .filter(entity::infraction::Column::RescindedAt.is_null())
            .filter(entity::infraction::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Infraction::from_entity(self.find_entity(id).await?).map(Some)
    }

    /// Soft deletes the infraction unless it is already deleted.
    pub async fn delete(&self, id: i32, deleted_by_id: u64) -> Result<Option<Infraction>, DbErr> {
        let result = entity::prelude::Infraction::update_many()
            .col_expr(
                entity::infraction::Column::DeletedById,
                Expr::value(deleted_by_id.to_string()),
            )
            .col_expr(entity::infraction::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::infraction::Column::Id.eq(id))
            .filter(entity::infraction::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Infraction::from_entity(self.find_entity(id).await?).map(Some)
    }

    /// Searches infractions in the guild, newest first.
    ///
    /// # Arguments
    /// - `page`: Page number (0-indexed)
    /// - `per_page`: Number of items per page
    pub async fn search(
        &self,
        guild_id: u64,
        criteria: &InfractionSearchCriteria,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Infraction>, DbErr> {
        let query = Self::apply_criteria(
            entity::prelude::Infraction::find()
                .filter(entity::infraction::Column::GuildId.eq(guild_id.to_string())),
            criteria,
        )
        .order_by_desc(entity::infraction::Column::CreatedAt)
        .order_by_desc(entity::infraction::Column::Id);

        let paginator = query.paginate(self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Infraction::from_entity)
            .collect::<Result<Vec<_>, DbErr>>()?;

        Ok(Paginated {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Counts the subject's non-deleted infractions by type.
    pub async fn count_by_type(
        &self,
        guild_id: u64,
        subject_id: u64,
    ) -> Result<InfractionCountsDto, DbErr> {
        let types: Vec<String> = entity::prelude::Infraction::find()
            .select_only()
            .column(entity::infraction::Column::InfractionType)
            .filter(entity::infraction::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::infraction::Column::SubjectId.eq(subject_id.to_string()))
            .filter(entity::infraction::Column::DeletedAt.is_null())
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts = InfractionCountsDto::default();
        for value in types {
            match value.parse::<InfractionType>() {
                Ok(InfractionType::Notice) => counts.notice += 1,
                Ok(InfractionType::Warning) => counts.warning += 1,
                Ok(InfractionType::Mute) => counts.mute += 1,
                Ok(InfractionType::Ban) => counts.ban += 1,
                Err(_) => {
                    return Err(DbErr::Custom(format!(
                        "Unknown infraction_type '{}'",
                        value
                    )))
                }
            }
        }

        Ok(counts)
    }

    /// Gets active timed infractions across all guilds whose duration has elapsed by `now`.
    pub async fn get_expired(&self, now: DateTime<Utc>) -> Result<Vec<Infraction>, DbErr> {
        entity::prelude::Infraction::find()
            .filter(entity::infraction::Column::ExpiresAt.lte(now))
            .filter(entity::infraction::Column::RescindedAt.is_null())
            .filter(entity::infraction::Column::DeletedAt.is_null())
            .order_by_asc(entity::infraction::Column::ExpiresAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Infraction::from_entity)
            .collect()
    }

    fn apply_criteria(
        mut query: Select<entity::prelude::Infraction>,
        criteria: &InfractionSearchCriteria,
    ) -> Select<entity::prelude::Infraction> {
        if !criteria.types.is_empty() {
            let types: Vec<&str> = criteria.types.iter().map(|t| t.as_ref()).collect();
            query = query.filter(entity::infraction::Column::InfractionType.is_in(types));
        }
        if let Some(subject_id) = criteria.subject_id {
            query = query.filter(entity::infraction::Column::SubjectId.eq(subject_id.to_string()));
        }
        if let Some(created_by_id) = criteria.created_by_id {
            query = query
                .filter(entity::infraction::Column::CreatedById.eq(created_by_id.to_string()));
        }
        if let Some(after) = criteria.created_after {
            query = query.filter(entity::infraction::Column::CreatedAt.gte(after));
        }
        if let Some(before) = criteria.created_before {
            query = query.filter(entity::infraction::Column::CreatedAt.lte(before));
        }
        match criteria.is_rescinded {
            Some(true) => {
                query = query.filter(entity::infraction::Column::RescindedAt.is_not_null())
            }
            Some(false) => query = query.filter(entity::infraction::Column::RescindedAt.is_null()),
            None => {}
        }
        match criteria.is_deleted.unwrap_or(false) {
            true => query = query.filter(entity::infraction::Column::DeletedAt.is_not_null()),
            false => query = query.filter(entity::infraction::Column::DeletedAt.is_null()),
        }

        query
    }

    async fn find_entity(&self, id: i32) -> Result<entity::infraction::Model, DbErr> {
        entity::prelude::Infraction::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("infraction {}", id)))
    }
}
