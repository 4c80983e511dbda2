//! Guild event handler.
//!
//! `guild_create` fires for every guild on startup, when the bot joins a guild
//! and when a guild becomes available again after an outage. Each time the
//! guild is mirrored in full, since events may have been missed while the bot
//! was away.

use std::collections::HashSet;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild};

use crate::server::{
    bot::command::slash,
    service::{
        authorization::AuthorizationService,
        discord::{DiscordGuildService, GuildMemberService},
    },
};

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request.
static MEMBERS_PER_REQUEST: u64 = 1000;

/// Handles the guild_create event when a guild becomes available or the bot joins a new guild.
///
/// 1. Mirrors the guild with its roles, channels and the members sent along
/// 2. Pages through every member from the API, since large guilds only send a
///    partial member list (requires the GUILD_MEMBERS intent)
/// 3. Marks stored members missing from a complete fetch as departed
/// 4. Grants all claims to administrator roles if the guild has no mappings yet
/// 5. Registers the slash commands for the guild
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild_id,
        guild.member_count,
    );

    if let Err(e) = DiscordGuildService::new(db).sync_guild(&guild).await {
        tracing::error!("Failed to sync guild {} ({}): {}", guild_id, guild.name, e);
        return;
    }

    let member_service = GuildMemberService::new(db);
    let mut synced = 0;
    let mut seen = HashSet::new();
    let mut complete = false;
    let mut after: Option<u64> = None;

    loop {
        let members = match ctx
            .http
            .get_guild_members(guild.id, Some(MEMBERS_PER_REQUEST), after)
            .await
        {
            Ok(members) => members,
            Err(e) => {
                tracing::error!("Failed to fetch guild {} members from API: {}", guild_id, e);
                break;
            }
        };

        after = members.last().map(|m| m.user.id.get());

        for member in &members {
            seen.insert(member.user.id.get());
            match member_service.upsert_member(member).await {
                Ok(_) => synced += 1,
                Err(e) => tracing::error!(
                    "Failed to sync member {} of guild {}: {}",
                    member.user.id,
                    guild_id,
                    e
                ),
            }
        }

        // Less than a full page means we've reached the end
        if members.len() < MEMBERS_PER_REQUEST as usize {
            complete = true;
            break;
        }
    }

    tracing::debug!("Synced {} members for guild {}", synced, guild_id);

    if complete {
        match member_service.prune_departed(guild_id, &seen).await {
            Ok(0) => {}
            Ok(removed) => tracing::info!(
                "Marked {} departed members of guild {} as left",
                removed,
                guild_id
            ),
            Err(e) => tracing::error!(
                "Failed to prune departed members of guild {}: {}",
                guild_id,
                e
            ),
        }
    }

    let bot_id = ctx.cache.current_user().id.get();
    match AuthorizationService::new(db)
        .auto_configure_guild(guild_id, bot_id)
        .await
    {
        Ok(true) => tracing::info!("Bootstrapped claim mappings for guild {}", guild_id),
        Ok(false) => {}
        Err(e) => tracing::error!("Failed to configure claims for guild {}: {}", guild_id, e),
    }

    if let Err(e) = guild.id.set_commands(&ctx.http, slash::commands()).await {
        tracing::error!(
            "Failed to register slash commands for guild {}: {}",
            guild_id,
            e
        );
    }
}
