//! Infraction factory.

use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, NotSet};

/// Factory for creating infractions.
///
/// Defaults to an active `Warning` created now by user `"1"`.
pub struct InfractionFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    subject_id: String,
    created_by_id: String,
    infraction_type: String,
    reason: String,
    duration_secs: Option<i64>,
    created_at: DateTime<Utc>,
    rescinded: bool,
    deleted: bool,
}

impl<'a> InfractionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str, subject_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            subject_id: subject_id.to_string(),
            created_by_id: "1".to_string(),
            infraction_type: "Warning".to_string(),
            reason: "Test infraction".to_string(),
            duration_secs: None,
            created_at: Utc::now(),
            rescinded: false,
            deleted: false,
        }
    }

    pub fn infraction_type(mut self, infraction_type: &str) -> Self {
        self.infraction_type = infraction_type.to_string();
        self
    }

    pub fn created_by(mut self, created_by_id: &str) -> Self {
        self.created_by_id = created_by_id.to_string();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn duration_secs(mut self, duration_secs: Option<i64>) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn rescinded(mut self) -> Self {
        self.rescinded = true;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    pub async fn build(self) -> Result<entity::infraction::Model, DbErr> {
        let now = Utc::now();
        let expires_at = self
            .duration_secs
            .and_then(TimeDelta::try_seconds)
            .and_then(|duration| self.created_at.checked_add_signed(duration));

        entity::infraction::ActiveModel {
            id: NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            infraction_type: ActiveValue::Set(self.infraction_type),
            reason: ActiveValue::Set(self.reason),
            duration_secs: ActiveValue::Set(self.duration_secs),
            expires_at: ActiveValue::Set(expires_at),
            subject_id: ActiveValue::Set(self.subject_id),
            created_by_id: ActiveValue::Set(self.created_by_id),
            created_at: ActiveValue::Set(self.created_at),
            rescinded_by_id: ActiveValue::Set(self.rescinded.then(|| "1".to_string())),
            rescinded_at: ActiveValue::Set(self.rescinded.then_some(now)),
            rescind_reason: ActiveValue::Set(None),
            deleted_by_id: ActiveValue::Set(self.deleted.then(|| "1".to_string())),
            deleted_at: ActiveValue::Set(self.deleted.then_some(now)),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active warning for the subject.
pub async fn create_infraction(
    db: &DatabaseConnection,
    guild_id: &str,
    subject_id: &str,
) -> Result<entity::infraction::Model, DbErr> {
    InfractionFactory::new(db, guild_id, subject_id).build().await
}
