use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Purpose a channel can be designated for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
pub enum DesignatedChannelType {
    ModerationLog,
    MessageLog,
    PromotionLog,
    PromotionNotifications,
    Unmoderated,
}

/// Purpose a role can be designated for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
pub enum DesignatedRoleType {
    Rank,
    ModerationMute,
    Pingable,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct DesignatedChannelDto {
    pub id: i32,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    pub designation: DesignatedChannelType,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateDesignatedChannelDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    pub designation: DesignatedChannelType,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct DesignatedRoleDto {
    pub id: i32,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub role_id: u64,
    pub designation: DesignatedRoleType,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateDesignatedRoleDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub role_id: u64,
    pub designation: DesignatedRoleType,
}
