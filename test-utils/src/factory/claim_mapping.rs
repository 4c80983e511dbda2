//! Claim mapping factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, NotSet};

/// Factory for creating claim mappings.
///
/// Defaults to an active `Granted` mapping created by user `"1"`. Exactly one of
/// `role_id`/`user_id` should be set before building.
pub struct ClaimMappingFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    claim: String,
    mapping_type: String,
    role_id: Option<String>,
    user_id: Option<String>,
    rescinded: bool,
}

impl<'a> ClaimMappingFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str, claim: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            claim: claim.to_string(),
            mapping_type: "Granted".to_string(),
            role_id: None,
            user_id: None,
            rescinded: false,
        }
    }

    pub fn role(mut self, role_id: &str) -> Self {
        self.role_id = Some(role_id.to_string());
        self
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn denied(mut self) -> Self {
        self.mapping_type = "Denied".to_string();
        self
    }

    pub fn rescinded(mut self) -> Self {
        self.rescinded = true;
        self
    }

    pub async fn build(self) -> Result<entity::claim_mapping::Model, DbErr> {
        let now = Utc::now();
        entity::claim_mapping::ActiveModel {
            id: NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            mapping_type: ActiveValue::Set(self.mapping_type),
            role_id: ActiveValue::Set(self.role_id),
            user_id: ActiveValue::Set(self.user_id),
            claim: ActiveValue::Set(self.claim),
            created_by_id: ActiveValue::Set("1".to_string()),
            created_at: ActiveValue::Set(now),
            rescinded_by_id: ActiveValue::Set(self.rescinded.then(|| "1".to_string())),
            rescinded_at: ActiveValue::Set(self.rescinded.then_some(now)),
        }
        .insert(self.db)
        .await
    }
}

/// Grants a claim to a role.
pub async fn create_role_claim(
    db: &DatabaseConnection,
    guild_id: &str,
    role_id: &str,
    claim: &str,
) -> Result<entity::claim_mapping::Model, DbErr> {
    ClaimMappingFactory::new(db, guild_id, claim)
        .role(role_id)
        .build()
        .await
}

/// Grants a claim directly to a user.
pub async fn create_user_claim(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    claim: &str,
) -> Result<entity::claim_mapping::Model, DbErr> {
    ClaimMappingFactory::new(db, guild_id, claim)
        .user(user_id)
        .build()
        .await
}
