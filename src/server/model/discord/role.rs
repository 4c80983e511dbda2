//! Discord guild role domain models.

use sea_orm::DbErr;
use serenity::all::Permissions;

use crate::{model::discord::DiscordRoleDto, server::util::parse::parse_snowflake};

/// Discord role within a guild with display properties and hierarchy position.
///
/// Higher positions indicate greater importance. The `@everyone` role shares
/// the guild's id and sits at position 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordGuildRole {
    pub role_id: u64,
    pub guild_id: u64,
    pub name: String,
    /// Role color in hex format (e.g., "#FF5733").
    pub color: String,
    pub position: i32,
    /// Raw Discord permission bits.
    pub permissions: u64,
}

impl DiscordGuildRole {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(DiscordGuildRole)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse an id or the permission bits
    pub fn from_entity(entity: entity::discord_guild_role::Model) -> Result<Self, DbErr> {
        Ok(Self {
            role_id: parse_snowflake(&entity.role_id, "role_id")?,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            name: entity.name,
            color: entity.color,
            position: entity.position,
            permissions: parse_snowflake(&entity.permissions, "permissions")?,
        })
    }

    pub fn is_administrator(&self) -> bool {
        Permissions::from_bits_truncate(self.permissions).administrator()
    }

    pub fn into_dto(self) -> DiscordRoleDto {
        DiscordRoleDto {
            role_id: self.role_id,
            name: self.name,
            color: self.color,
            position: self.position,
        }
    }
}
