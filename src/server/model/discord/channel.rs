use sea_orm::DbErr;

use crate::{
    model::discord::DiscordChannelDto,
    server::util::parse::{parse_optional_snowflake, parse_snowflake},
};

/// Discord channel within a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordGuildChannel {
    pub channel_id: u64,
    pub guild_id: u64,
    pub name: String,
    /// Channel type name as reported by Serenity, e.g. "text" or "category".
    pub kind: String,
    pub position: i32,
    pub parent_id: Option<u64>,
}

impl DiscordGuildChannel {
    pub fn from_entity(entity: entity::discord_guild_channel::Model) -> Result<Self, DbErr> {
        Ok(Self {
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            name: entity.name,
            kind: entity.kind,
            position: entity.position,
            parent_id: parse_optional_snowflake(entity.parent_id.as_deref(), "parent_id")?,
        })
    }

    pub fn into_dto(self) -> DiscordChannelDto {
        DiscordChannelDto {
            channel_id: self.channel_id,
            name: self.name,
            kind: self.kind,
            position: self.position,
            parent_id: self.parent_id,
        }
    }
}
