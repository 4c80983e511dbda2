//! Role event handlers.
//!
//! Every role is mirrored, since claim mappings, rank designations and the
//! outranking checks all resolve through role positions.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, Role, RoleId};

use crate::server::service::discord::DiscordGuildRoleService;

pub async fn handle_guild_role_create(db: &DatabaseConnection, _ctx: Context, new: Role) {
    let guild_id = new.guild_id.get();

    if let Err(e) = DiscordGuildRoleService::new(db).upsert(guild_id, &new).await {
        tracing::error!(
            "Failed to upsert new role {} in guild {}: {}",
            new.name,
            guild_id,
            e
        );
    } else {
        tracing::debug!("Created role {} in guild {}", new.name, guild_id);
    }
}

/// Handles a change of name, color, permissions or position.
///
/// Discord sends one update per role whose position shifted, so reordering
/// roles produces a burst of these.
pub async fn handle_guild_role_update(
    db: &DatabaseConnection,
    _ctx: Context,
    _old: Option<Role>,
    new: Role,
) {
    let guild_id = new.guild_id.get();

    if let Err(e) = DiscordGuildRoleService::new(db).upsert(guild_id, &new).await {
        tracing::error!(
            "Failed to upsert updated role {} in guild {}: {}",
            new.name,
            guild_id,
            e
        );
    } else {
        tracing::debug!("Updated role {} in guild {}", new.name, guild_id);
    }
}

/// Removes the role from the mirror. Member assignments go with it through
/// the foreign key cascade.
pub async fn handle_guild_role_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    guild_id: GuildId,
    removed_role_id: RoleId,
    _removed_role_data_if_in_cache: Option<Role>,
) {
    if let Err(e) = DiscordGuildRoleService::new(db)
        .delete(removed_role_id.get())
        .await
    {
        tracing::error!(
            "Failed to delete role {} from guild {}: {}",
            removed_role_id,
            guild_id,
            e
        );
    } else {
        tracing::info!("Deleted role {} from guild {}", removed_role_id, guild_id);
    }
}
