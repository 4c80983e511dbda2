//! Discord guild role factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Administrator permission bit as Discord encodes it.
pub const ADMINISTRATOR: u64 = 1 << 3;

/// Factory for creating mirrored guild roles.
///
/// Defaults to position 1, no color and no permissions.
pub struct DiscordGuildRoleFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    role_id: String,
    name: String,
    position: i32,
    permissions: u64,
}

impl<'a> DiscordGuildRoleFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.to_string(),
            role_id: id.to_string(),
            name: format!("Role {}", id),
            position: 1,
            permissions: 0,
        }
    }

    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Grants the Discord Administrator permission to the role.
    pub fn administrator(mut self) -> Self {
        self.permissions |= ADMINISTRATOR;
        self
    }

    pub async fn build(self) -> Result<entity::discord_guild_role::Model, DbErr> {
        entity::discord_guild_role::ActiveModel {
            role_id: ActiveValue::Set(self.role_id),
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            color: ActiveValue::Set("#000000".to_string()),
            position: ActiveValue::Set(self.position),
            permissions: ActiveValue::Set(self.permissions.to_string()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a role with default values in the guild.
pub async fn create_guild_role(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::discord_guild_role::Model, DbErr> {
    DiscordGuildRoleFactory::new(db, guild_id).build().await
}

/// Creates a role with a specific id and position.
pub async fn create_guild_role_with_position(
    db: &DatabaseConnection,
    guild_id: &str,
    role_id: &str,
    position: i32,
) -> Result<entity::discord_guild_role::Model, DbErr> {
    DiscordGuildRoleFactory::new(db, guild_id)
        .role_id(role_id)
        .position(position)
        .build()
        .await
}
