use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::parse_snowflake;

/// A user's membership record in a guild.
///
/// Rows are kept after the user leaves so infractions and campaigns can still
/// show who they were; `is_member` tracks current membership.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildUser {
    pub guild_id: u64,
    pub user_id: u64,
    pub nickname: Option<String>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub is_member: bool,
}

impl GuildUser {
    pub fn from_entity(entity: entity::guild_user::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            nickname: entity.nickname,
            first_seen: entity.first_seen,
            last_seen: entity.last_seen,
            is_member: entity.is_member,
        })
    }
}

/// Number of mirrored messages a user sent in one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessageCount {
    pub channel_id: u64,
    pub count: u64,
}
