//! Guild membership factories.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, NotSet};

/// Factory for creating guild membership rows.
///
/// Defaults to a current member with no nickname, first and last seen now.
pub struct GuildUserFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    nickname: Option<String>,
    last_seen: DateTime<Utc>,
    is_member: bool,
}

impl<'a> GuildUserFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: &str, user_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            nickname: None,
            last_seen: Utc::now(),
            is_member: true,
        }
    }

    pub fn nickname(mut self, nickname: Option<String>) -> Self {
        self.nickname = nickname;
        self
    }

    pub fn last_seen(mut self, last_seen: DateTime<Utc>) -> Self {
        self.last_seen = last_seen;
        self
    }

    pub fn is_member(mut self, is_member: bool) -> Self {
        self.is_member = is_member;
        self
    }

    pub async fn build(self) -> Result<entity::guild_user::Model, DbErr> {
        entity::guild_user::ActiveModel {
            id: NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            nickname: ActiveValue::Set(self.nickname),
            first_seen: ActiveValue::Set(self.last_seen),
            last_seen: ActiveValue::Set(self.last_seen),
            is_member: ActiveValue::Set(self.is_member),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a current membership for the user in the guild.
pub async fn create_guild_user(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<entity::guild_user::Model, DbErr> {
    GuildUserFactory::new(db, guild_id, user_id).build().await
}

/// Assigns a role to a guild member.
pub async fn create_guild_user_role(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<entity::guild_user_role::Model, DbErr> {
    entity::guild_user_role::ActiveModel {
        id: NotSet,
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        role_id: ActiveValue::Set(role_id.to_string()),
    }
    .insert(db)
    .await
}
