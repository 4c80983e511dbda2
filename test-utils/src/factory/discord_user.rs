//! Discord user factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating mirrored Discord users.
///
/// Defaults:
/// - discord_id: unique counter value
/// - username: `"user{id}"`
/// - global_name: `None`
/// - is_bot: `false`
pub struct DiscordUserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    username: String,
    global_name: Option<String>,
    is_bot: bool,
}

impl<'a> DiscordUserFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: id.to_string(),
            username: format!("user{}", id),
            global_name: None,
            is_bot: false,
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn global_name(mut self, global_name: Option<String>) -> Self {
        self.global_name = global_name;
        self
    }

    pub fn is_bot(mut self, is_bot: bool) -> Self {
        self.is_bot = is_bot;
        self
    }

    /// Inserts the user into the database.
    pub async fn build(self) -> Result<entity::discord_user::Model, DbErr> {
        let now = Utc::now();
        entity::discord_user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            username: ActiveValue::Set(self.username),
            global_name: ActiveValue::Set(self.global_name),
            avatar_hash: ActiveValue::Set(None),
            is_bot: ActiveValue::Set(self.is_bot),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::discord_user::Model, DbErr> {
    DiscordUserFactory::new(db).build().await
}

/// Creates a user with a specific Discord id.
pub async fn create_user_with_id(
    db: &DatabaseConnection,
    discord_id: impl Into<String>,
) -> Result<entity::discord_user::Model, DbErr> {
    DiscordUserFactory::new(db).discord_id(discord_id).build().await
}
