//! Claim resolution and claim mapping management.
//!
//! A member's claims are resolved from the active mappings of their roles and
//! of the member themselves:
//!
//! 1. Role mappings in ascending role position, so `@everyone` comes first and
//!    higher roles override lower ones. Within a role, grants are applied
//!    before denials.
//! 2. User mappings last, overriding everything their roles resolved to.

use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

use crate::{
    model::authorization::{AuthorizationClaim, ClaimMappingType},
    server::{
        data::{
            claim_mapping::ClaimMappingRepository,
            discord::{DiscordGuildRoleRepository, GuildUserRepository, GuildUserRoleRepository},
        },
        error::{auth::AuthError, AppError},
        model::{
            authorization::{AuthContext, ClaimMapping, ClaimTarget},
            discord::DiscordGuildRole,
        },
    },
};

pub struct AuthorizationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthorizationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the authorization context of a current guild member.
    ///
    /// # Returns
    /// - `Ok(AuthContext)` - Context holding the member's roles and resolved claims
    /// - `Err(AuthError::NotGuildMember)` - The user is not a mirrored member of the guild
    pub async fn build_context(&self, guild_id: u64, user_id: u64) -> Result<AuthContext, AppError> {
        let membership = GuildUserRepository::new(self.db)
            .find(guild_id, user_id)
            .await?;

        if !membership.is_some_and(|m| m.is_member) {
            return Err(AuthError::NotGuildMember { guild_id, user_id }.into());
        }

        let role_ids = GuildUserRoleRepository::new(self.db)
            .get_role_ids(guild_id, user_id)
            .await?;
        let claims = self
            .get_guild_user_claims(guild_id, user_id, &role_ids)
            .await?;

        Ok(AuthContext::new(guild_id, user_id, role_ids, claims))
    }

    /// Resolves the claims a member holds through their roles and user mappings.
    ///
    /// The `@everyone` role shares the guild's id and is always included.
    pub async fn get_guild_user_claims(
        &self,
        guild_id: u64,
        user_id: u64,
        role_ids: &[u64],
    ) -> Result<BTreeSet<AuthorizationClaim>, AppError> {
        let mut role_ids = role_ids.to_vec();
        if !role_ids.contains(&guild_id) {
            role_ids.push(guild_id);
        }

        let mappings = ClaimMappingRepository::new(self.db)
            .get_active_for_user(guild_id, user_id, &role_ids)
            .await?;
        let roles = DiscordGuildRoleRepository::new(self.db)
            .get_by_ids(&role_ids)
            .await?;

        Ok(resolve_claims(&roles, &mappings, user_id))
    }

    /// Grants every claim to every administrator role when a guild has never
    /// been configured.
    ///
    /// # Returns
    /// - `Ok(true)` - Mappings were created
    /// - `Ok(false)` - The guild already had mappings or has no administrator roles
    pub async fn auto_configure_guild(&self, guild_id: u64, actor_id: u64) -> Result<bool, AppError> {
        if ClaimMappingRepository::new(self.db)
            .any_exist(guild_id)
            .await?
        {
            return Ok(false);
        }

        let admin_roles: Vec<DiscordGuildRole> = DiscordGuildRoleRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?
            .into_iter()
            .filter(|role| role.is_administrator())
            .collect();

        if admin_roles.is_empty() {
            tracing::warn!(
                "Guild {} has no administrator roles to bootstrap claims for",
                guild_id
            );
            return Ok(false);
        }

        let txn = self.db.begin().await?;
        let claim_repo = ClaimMappingRepository::new(&txn);

        for role in &admin_roles {
            for claim in AuthorizationClaim::iter() {
                claim_repo
                    .create(
                        guild_id,
                        ClaimTarget::Role(role.role_id),
                        claim,
                        ClaimMappingType::Granted,
                        actor_id,
                    )
                    .await?;
            }
        }

        txn.commit().await?;

        tracing::info!(
            "Granted all claims to {} administrator roles in guild {}",
            admin_roles.len(),
            guild_id
        );

        Ok(true)
    }

    pub async fn get_claim_mappings(&self, ctx: &AuthContext) -> Result<Vec<ClaimMapping>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::AuthorizationConfigure])?;

        Ok(ClaimMappingRepository::new(self.db)
            .get_active_by_guild(ctx.guild_id)
            .await?)
    }

    /// Replaces the claim mappings of a role or user.
    ///
    /// The caller may only grant or deny claims they hold themselves. Existing
    /// mappings of the target are rescinded and the new ones created atomically.
    pub async fn modify_claims(
        &self,
        ctx: &AuthContext,
        target: ClaimTarget,
        granted: &[AuthorizationClaim],
        denied: &[AuthorizationClaim],
    ) -> Result<Vec<ClaimMapping>, AppError> {
        ctx.require_claims(&[AuthorizationClaim::AuthorizationConfigure])?;

        let granted: BTreeSet<AuthorizationClaim> = granted.iter().copied().collect();
        let denied: BTreeSet<AuthorizationClaim> = denied.iter().copied().collect();

        if let Some(claim) = granted.intersection(&denied).next() {
            return Err(AppError::BadRequest(format!(
                "Claim {} cannot be both granted and denied",
                claim
            )));
        }

        let requested: Vec<AuthorizationClaim> = granted.union(&denied).copied().collect();
        ctx.require_claims(&requested)?;

        if let ClaimTarget::Role(role_id) = target {
            let role = DiscordGuildRoleRepository::new(self.db)
                .find_by_id(role_id)
                .await?;
            if !role.is_some_and(|r| r.guild_id == ctx.guild_id) {
                return Err(AppError::NotFound(format!("Role {} not found", role_id)));
            }
        }

        let txn = self.db.begin().await?;
        let claim_repo = ClaimMappingRepository::new(&txn);

        for existing in claim_repo.get_active_for_target(ctx.guild_id, target).await? {
            claim_repo.rescind(existing.id, ctx.user_id).await?;
        }

        let mut mappings = Vec::with_capacity(requested.len());
        let changes = granted
            .iter()
            .map(|claim| (*claim, ClaimMappingType::Granted))
            .chain(denied.iter().map(|claim| (*claim, ClaimMappingType::Denied)));
        for (claim, mapping_type) in changes {
            mappings.push(
                claim_repo
                    .create(ctx.guild_id, target, claim, mapping_type, ctx.user_id)
                    .await?,
            );
        }

        txn.commit().await?;

        Ok(mappings)
    }
}

/// Applies claim mappings in precedence order.
///
/// `roles` are the member's mirrored roles; mappings for roles not in the list
/// are ignored.
pub fn resolve_claims(
    roles: &[DiscordGuildRole],
    mappings: &[ClaimMapping],
    user_id: u64,
) -> BTreeSet<AuthorizationClaim> {
    let mut roles: Vec<&DiscordGuildRole> = roles.iter().collect();
    roles.sort_by_key(|role| (role.position, role.role_id));

    let mut claims = BTreeSet::new();

    for role in roles {
        let role_mappings: Vec<&ClaimMapping> = mappings
            .iter()
            .filter(|m| m.role_id == Some(role.role_id))
            .collect();
        apply_mappings(&mut claims, &role_mappings);
    }

    let user_mappings: Vec<&ClaimMapping> = mappings
        .iter()
        .filter(|m| m.user_id == Some(user_id))
        .collect();
    apply_mappings(&mut claims, &user_mappings);

    claims
}

/// Grants first, then denials, so a denial wins within one target.
fn apply_mappings(claims: &mut BTreeSet<AuthorizationClaim>, mappings: &[&ClaimMapping]) {
    for mapping in mappings
        .iter()
        .filter(|m| m.mapping_type == ClaimMappingType::Granted)
    {
        claims.insert(mapping.claim);
    }
    for mapping in mappings
        .iter()
        .filter(|m| m.mapping_type == ClaimMappingType::Denied)
    {
        claims.remove(&mapping.claim);
    }
}
