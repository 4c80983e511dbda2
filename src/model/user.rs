use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{discord::DiscordRoleDto, infraction::InfractionCountsDto};

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct UserDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub discord_id: u64,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar_hash: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ChannelMessageCountDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    pub channel_name: Option<String>,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct UserInfoDto {
    pub user: UserDto,
    pub is_bot: bool,
    pub nickname: Option<String>,
    pub is_member: bool,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    pub roles: Vec<DiscordRoleDto>,
    pub message_counts: Vec<ChannelMessageCountDto>,
    /// Present when the caller may read moderation data.
    pub infraction_counts: Option<InfractionCountsDto>,
}
