use std::collections::HashSet;

use sea_orm::{DatabaseConnection, TransactionTrait};
use serenity::all::Member;

use crate::server::{
    data::discord::{DiscordUserRepository, GuildUserRepository, GuildUserRoleRepository},
    error::AppError,
    model::discord::{DiscordUser, GuildUser},
};

/// Number of users returned by a search when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

pub struct GuildMemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildMemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Mirrors the member's user profile, membership and role set.
    pub async fn upsert_member(&self, member: &Member) -> Result<GuildUser, AppError> {
        let guild_id = member.guild_id.get();
        let user_id = member.user.id.get();
        let role_ids: Vec<u64> = member.roles.iter().map(|role| role.get()).collect();

        let txn = self.db.begin().await?;

        DiscordUserRepository::new(&txn).upsert(&member.user).await?;
        let guild_user = GuildUserRepository::new(&txn)
            .upsert(guild_id, user_id, member.nick.clone())
            .await?;
        GuildUserRoleRepository::new(&txn)
            .sync_user_roles(guild_id, user_id, &role_ids)
            .await?;

        txn.commit().await?;

        Ok(guild_user)
    }

    /// Marks the user as gone from the guild and clears their roles.
    pub async fn remove_member(&self, guild_id: u64, user_id: u64) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        GuildUserRepository::new(&txn)
            .mark_left(guild_id, user_id)
            .await?;
        GuildUserRoleRepository::new(&txn)
            .sync_user_roles(guild_id, user_id, &[])
            .await?;

        txn.commit().await?;

        Ok(())
    }

    /// Marks every stored member that is absent from `current` as left.
    ///
    /// Only call this with a complete member list; a partial fetch would mark
    /// members who are still present. Returns the number of members removed.
    pub async fn prune_departed(
        &self,
        guild_id: u64,
        current: &HashSet<u64>,
    ) -> Result<usize, AppError> {
        let stored = GuildUserRepository::new(self.db)
            .get_member_ids(guild_id)
            .await?;

        let mut removed = 0;
        for user_id in stored.into_iter().filter(|id| !current.contains(id)) {
            self.remove_member(guild_id, user_id).await?;
            removed += 1;
        }

        Ok(removed)
    }

    /// Finds current members whose username, global name or nickname contains
    /// the query, ignoring case.
    pub async fn search_users(
        &self,
        guild_id: u64,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(DiscordUser, GuildUser)>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT) as u64;

        Ok(GuildUserRepository::new(self.db)
            .search_members(guild_id, query.trim(), limit)
            .await?)
    }
}
