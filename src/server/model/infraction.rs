//! Infraction and moderation action models.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;
use strum::{AsRefStr, Display, EnumString};

use crate::{
    model::infraction::{InfractionDto, InfractionType, PaginatedInfractionsDto},
    server::{
        model::Paginated,
        util::parse::{parse_enum, parse_optional_snowflake, parse_snowflake},
    },
};

/// A recorded moderation action against a guild member.
#[derive(Debug, Clone, PartialEq)]
pub struct Infraction {
    pub id: i32,
    pub guild_id: u64,
    pub infraction_type: InfractionType,
    pub reason: String,
    pub duration: Option<Duration>,
    pub subject_id: u64,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub rescinded_by_id: Option<u64>,
    pub rescinded_at: Option<DateTime<Utc>>,
    pub rescind_reason: Option<String>,
    pub deleted_by_id: Option<u64>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Infraction {
    pub fn from_entity(entity: entity::infraction::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            infraction_type: parse_enum(&entity.infraction_type, "infraction_type")?,
            reason: entity.reason,
            duration: entity
                .duration_secs
                .map(|secs| {
                    Duration::try_seconds(secs)
                        .ok_or_else(|| DbErr::Custom(format!("Invalid duration_secs {}", secs)))
                })
                .transpose()?,
            subject_id: parse_snowflake(&entity.subject_id, "subject_id")?,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
            rescinded_by_id: parse_optional_snowflake(
                entity.rescinded_by_id.as_deref(),
                "rescinded_by_id",
            )?,
            rescinded_at: entity.rescinded_at,
            rescind_reason: entity.rescind_reason,
            deleted_by_id: parse_optional_snowflake(
                entity.deleted_by_id.as_deref(),
                "deleted_by_id",
            )?,
            deleted_at: entity.deleted_at,
        })
    }

    /// Neither rescinded nor deleted.
    pub fn is_active(&self) -> bool {
        self.rescinded_at.is_none() && self.deleted_at.is_none()
    }

    /// `None` for permanent infractions, or when the expiry is not representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.duration
            .and_then(|duration| self.created_at.checked_add_signed(duration))
    }

    pub fn into_dto(self) -> InfractionDto {
        InfractionDto {
            id: self.id,
            infraction_type: self.infraction_type,
            expires_at: self.expires_at(),
            reason: self.reason,
            duration_secs: self.duration.map(|d| d.num_seconds()),
            subject_id: self.subject_id,
            created_by_id: self.created_by_id,
            created_at: self.created_at,
            rescinded_by_id: self.rescinded_by_id,
            rescinded_at: self.rescinded_at,
            rescind_reason: self.rescind_reason,
            deleted_by_id: self.deleted_by_id,
            deleted_at: self.deleted_at,
        }
    }
}

impl Paginated<Infraction> {
    pub fn into_dto(self) -> PaginatedInfractionsDto {
        PaginatedInfractionsDto {
            infractions: self.items.into_iter().map(Infraction::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Fields of a new infraction row.
#[derive(Debug, Clone)]
pub struct CreateInfractionParam {
    pub guild_id: u64,
    pub infraction_type: InfractionType,
    pub reason: String,
    pub duration: Option<Duration>,
    pub subject_id: u64,
    pub created_by_id: u64,
}

/// Filters for infraction searches. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct InfractionSearchCriteria {
    pub types: Vec<InfractionType>,
    pub subject_id: Option<u64>,
    pub created_by_id: Option<u64>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub is_rescinded: Option<bool>,
    /// Deleted infractions are excluded unless explicitly requested.
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
pub enum ModerationActionType {
    InfractionCreated,
    InfractionRescinded,
    InfractionDeleted,
    MessageDeleted,
    MessageBatchDeleted,
}

/// Audit row describing what a moderator did.
#[derive(Debug, Clone, Default)]
pub struct ModerationActionParam {
    pub guild_id: u64,
    pub created_by_id: u64,
    pub infraction_id: Option<i32>,
    pub deleted_message_id: Option<u64>,
    pub deleted_message_batch_id: Option<i32>,
}
