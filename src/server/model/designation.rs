use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::designation::{
        DesignatedChannelDto, DesignatedChannelType, DesignatedRoleDto, DesignatedRoleType,
    },
    server::util::parse::{parse_enum, parse_snowflake},
};

/// A channel tagged for an application purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignatedChannelMapping {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub designation: DesignatedChannelType,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
}

impl DesignatedChannelMapping {
    pub fn from_entity(entity: entity::designated_channel_mapping::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            designation: parse_enum(&entity.designation, "designation")?,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> DesignatedChannelDto {
        DesignatedChannelDto {
            id: self.id,
            channel_id: self.channel_id,
            designation: self.designation,
            created_at: self.created_at,
        }
    }
}

/// A role tagged for an application purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignatedRoleMapping {
    pub id: i32,
    pub guild_id: u64,
    pub role_id: u64,
    pub designation: DesignatedRoleType,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
}

impl DesignatedRoleMapping {
    pub fn from_entity(entity: entity::designated_role_mapping::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            role_id: parse_snowflake(&entity.role_id, "role_id")?,
            designation: parse_enum(&entity.designation, "designation")?,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> DesignatedRoleDto {
        DesignatedRoleDto {
            id: self.id,
            role_id: self.role_id,
            designation: self.designation,
            created_at: self.created_at,
        }
    }
}
