//! Rank resolution shared by moderation and promotions.
//!
//! Ranks are roles designated `Rank`, ordered by their Discord position.

use sea_orm::ConnectionTrait;

use crate::{
    model::designation::DesignatedRoleType,
    server::{
        data::{designation::DesignatedRoleRepository, discord::DiscordGuildRoleRepository},
        error::AppError,
        model::discord::DiscordGuildRole,
    },
};

/// Gets the guild's rank roles, lowest position first.
pub async fn get_rank_roles<C: ConnectionTrait>(
    db: &C,
    guild_id: u64,
) -> Result<Vec<DiscordGuildRole>, AppError> {
    let rank_ids = DesignatedRoleRepository::new(db)
        .get_role_ids(guild_id, DesignatedRoleType::Rank)
        .await?;

    let mut ranks = DiscordGuildRoleRepository::new(db)
        .get_by_ids(&rank_ids)
        .await?;
    ranks.sort_by_key(|role| (role.position, role.role_id));

    Ok(ranks)
}

/// Highest rank among the given roles.
pub fn highest_rank<'r>(ranks: &'r [DiscordGuildRole], role_ids: &[u64]) -> Option<&'r DiscordGuildRole> {
    ranks
        .iter()
        .filter(|rank| role_ids.contains(&rank.role_id))
        .max_by_key(|rank| rank.position)
}

/// Lowest rank above the highest rank among the given roles.
///
/// Members without a rank get the lowest rank; members at the top get `None`.
pub fn next_rank<'r>(ranks: &'r [DiscordGuildRole], role_ids: &[u64]) -> Option<&'r DiscordGuildRole> {
    match highest_rank(ranks, role_ids) {
        Some(current) => ranks
            .iter()
            .filter(|rank| rank.position > current.position)
            .min_by_key(|rank| rank.position),
        None => ranks.iter().min_by_key(|rank| rank.position),
    }
}

/// Whether a moderator with `moderator_rank` may act on a subject with `subject_rank`.
///
/// Subjects without a rank can always be acted on; otherwise the moderator
/// needs a strictly higher rank.
pub fn outranks(moderator_rank: Option<i32>, subject_rank: Option<i32>) -> bool {
    match (moderator_rank, subject_rank) {
        (_, None) => true,
        (Some(moderator), Some(subject)) => subject < moderator,
        (None, Some(_)) => false,
    }
}
