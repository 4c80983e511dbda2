//! Claim mapping and authorization context models.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

use crate::{
    model::authorization::{AuthorizationClaim, ClaimMappingDto, ClaimMappingType},
    server::{
        error::{auth::AuthError, AppError},
        util::parse::{parse_enum, parse_optional_snowflake, parse_snowflake},
    },
};

/// A grant or denial of a claim to a role or a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimMapping {
    pub id: i32,
    pub guild_id: u64,
    pub mapping_type: ClaimMappingType,
    pub role_id: Option<u64>,
    pub user_id: Option<u64>,
    pub claim: AuthorizationClaim,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub rescinded_at: Option<DateTime<Utc>>,
}

impl ClaimMapping {
    pub fn from_entity(entity: entity::claim_mapping::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            mapping_type: parse_enum(&entity.mapping_type, "mapping_type")?,
            role_id: parse_optional_snowflake(entity.role_id.as_deref(), "role_id")?,
            user_id: parse_optional_snowflake(entity.user_id.as_deref(), "user_id")?,
            claim: parse_enum(&entity.claim, "claim")?,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
            rescinded_at: entity.rescinded_at,
        })
    }

    pub fn into_dto(self) -> ClaimMappingDto {
        ClaimMappingDto {
            id: self.id,
            mapping_type: self.mapping_type,
            role_id: self.role_id,
            user_id: self.user_id,
            claim: self.claim,
            created_by_id: self.created_by_id,
            created_at: self.created_at,
        }
    }
}

/// The role or user a set of claim mappings applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimTarget {
    Role(u64),
    User(u64),
}

/// Request-scoped authorization state for one user in one guild.
///
/// Built once per command or HTTP request and passed to every service call.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub guild_id: u64,
    pub user_id: u64,
    pub role_ids: Vec<u64>,
    pub claims: BTreeSet<AuthorizationClaim>,
    /// Set for actions the bot performs on its own, such as expiring
    /// infractions. System contexts hold every claim and skip rank checks.
    pub is_system: bool,
}

impl AuthContext {
    pub fn new(
        guild_id: u64,
        user_id: u64,
        role_ids: Vec<u64>,
        claims: BTreeSet<AuthorizationClaim>,
    ) -> Self {
        Self {
            guild_id,
            user_id,
            role_ids,
            claims,
            is_system: false,
        }
    }

    /// Context for the bot acting as itself.
    pub fn system(guild_id: u64, bot_user_id: u64) -> Self {
        Self {
            guild_id,
            user_id: bot_user_id,
            role_ids: Vec::new(),
            claims: AuthorizationClaim::iter().collect(),
            is_system: true,
        }
    }

    pub fn has_claim(&self, claim: AuthorizationClaim) -> bool {
        self.claims.contains(&claim)
    }

    /// Fails with `AuthError::MissingClaims` listing every claim not held.
    pub fn require_claims(&self, claims: &[AuthorizationClaim]) -> Result<(), AppError> {
        let missing: Vec<AuthorizationClaim> = claims
            .iter()
            .copied()
            .filter(|claim| !self.has_claim(*claim))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuthError::MissingClaims(missing).into())
        }
    }
}
