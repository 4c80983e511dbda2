use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct DiscordGuildDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub guild_id: u64,
    pub name: String,
    pub icon_hash: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct DiscordRoleDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub role_id: u64,
    pub name: String,
    pub color: String,
    pub position: i32,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct DiscordChannelDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    pub name: String,
    pub kind: String,
    pub position: i32,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub parent_id: Option<u64>,
}

/// A guild member as returned by the user search endpoint.
#[derive(Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct GuildMemberDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub user_id: u64,
    pub username: String,
    pub global_name: Option<String>,
    pub nickname: Option<String>,
}
