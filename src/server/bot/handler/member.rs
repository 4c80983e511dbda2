//! Member event handlers.
//!
//! Every member is mirrored, not just users who logged into the web app, so
//! commands can resolve roles and ranks of anyone in the guild.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, GuildMemberUpdateEvent, Member, User};

use crate::server::service::discord::GuildMemberService;

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(
    db: &DatabaseConnection,
    _ctx: Context,
    new_member: Member,
) {
    let guild_id = new_member.guild_id.get();

    if let Err(e) = GuildMemberService::new(db).upsert_member(&new_member).await {
        tracing::error!(
            "Failed to mirror member {} joining guild {}: {}",
            new_member.user.id,
            guild_id,
            e
        );
    } else {
        tracing::debug!("User {} joined guild {}", new_member.user.name, guild_id);
    }
}

/// Handles the guild_member_removal event when a member leaves a guild
///
/// The membership row is kept with `is_member` cleared so infractions and
/// user info still resolve for former members.
pub async fn handle_guild_member_removal(
    db: &DatabaseConnection,
    _ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    if let Err(e) = GuildMemberService::new(db)
        .remove_member(guild_id.get(), user.id.get())
        .await
    {
        tracing::error!(
            "Failed to mark user {} as having left guild {}: {}",
            user.id,
            guild_id,
            e
        );
    } else {
        tracing::debug!("User {} left guild {}", user.name, guild_id);
    }
}

/// Handles the guild_member_update event when a member is updated in a guild (roles, nickname, etc.)
pub async fn handle_guild_member_update(
    db: &DatabaseConnection,
    _ctx: Context,
    _old: Option<Member>,
    new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    // Without the cache Serenity can't build the full member
    let Some(member) = new else {
        tracing::debug!(
            "Skipping update of uncached member {} in guild {}",
            event.user.id,
            event.guild_id
        );
        return;
    };

    if let Err(e) = GuildMemberService::new(db).upsert_member(&member).await {
        tracing::error!(
            "Failed to sync member {} in guild {}: {}",
            member.user.id,
            member.guild_id,
            e
        );
    }
}
