use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{model::user::UserDto, server::util::parse::parse_snowflake};

/// A Discord user seen by the bot or logged into the web API.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordUser {
    pub discord_id: u64,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar_hash: Option<String>,
    pub is_bot: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiscordUser {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(DiscordUser)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored discord_id is not a valid snowflake
    pub fn from_entity(entity: entity::discord_user::Model) -> Result<Self, DbErr> {
        Ok(Self {
            discord_id: parse_snowflake(&entity.discord_id, "discord_id")?,
            username: entity.username,
            global_name: entity.global_name,
            avatar_hash: entity.avatar_hash,
            is_bot: entity.is_bot,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Name shown in chat replies and log messages.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            discord_id: self.discord_id,
            username: self.username,
            global_name: self.global_name,
            avatar_hash: self.avatar_hash,
        }
    }
}
