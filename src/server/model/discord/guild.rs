use sea_orm::DbErr;

use crate::{model::discord::DiscordGuildDto, server::util::parse::parse_snowflake};

/// Discord guild the bot is a member of.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscordGuild {
    pub guild_id: u64,
    pub name: String,
    pub icon_hash: Option<String>,
    pub owner_id: u64,
}

impl DiscordGuild {
    pub fn from_entity(entity: entity::discord_guild::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            name: entity.name,
            icon_hash: entity.icon_hash,
            owner_id: parse_snowflake(&entity.owner_id, "owner_id")?,
        })
    }

    pub fn into_dto(self) -> DiscordGuildDto {
        DiscordGuildDto {
            guild_id: self.guild_id,
            name: self.name,
            icon_hash: self.icon_hash,
        }
    }
}
