//! Discord guild factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating mirrored Discord guilds.
pub struct DiscordGuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    icon_hash: Option<String>,
    owner_id: String,
}

impl<'a> DiscordGuildFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("Guild {}", id),
            icon_hash: None,
            owner_id: "1".to_string(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn icon_hash(mut self, icon_hash: Option<String>) -> Self {
        self.icon_hash = icon_hash;
        self
    }

    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub async fn build(self) -> Result<entity::discord_guild::Model, DbErr> {
        entity::discord_guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            icon_hash: ActiveValue::Set(self.icon_hash),
            owner_id: ActiveValue::Set(self.owner_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild with default values.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::discord_guild::Model, DbErr> {
    DiscordGuildFactory::new(db).build().await
}
