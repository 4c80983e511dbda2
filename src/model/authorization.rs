use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// A permission that can be granted to or denied from roles and users.
///
/// Claims are stored by name, so variants must never be renamed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
pub enum AuthorizationClaim {
    AuthorizationConfigure,
    DesignatedChannelMappingRead,
    DesignatedChannelMappingCreate,
    DesignatedChannelMappingDelete,
    DesignatedRoleMappingRead,
    DesignatedRoleMappingCreate,
    DesignatedRoleMappingDelete,
    ModerationNote,
    ModerationWarn,
    ModerationMute,
    ModerationBan,
    ModerationRescind,
    ModerationDelete,
    ModerationRead,
    ModerationMassDeleteMessages,
    ModerationDeleteMessage,
    LogViewDeletedMessages,
    PromotionsCreateCampaign,
    PromotionsComment,
    PromotionsCloseCampaign,
    PromotionsRead,
}

/// Grouping of claims for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display)]
pub enum ClaimCategory {
    Authorization,
    Designations,
    Moderation,
    Log,
    Promotions,
}

impl AuthorizationClaim {
    pub fn category(&self) -> ClaimCategory {
        use AuthorizationClaim::*;

        match self {
            AuthorizationConfigure => ClaimCategory::Authorization,
            DesignatedChannelMappingRead
            | DesignatedChannelMappingCreate
            | DesignatedChannelMappingDelete
            | DesignatedRoleMappingRead
            | DesignatedRoleMappingCreate
            | DesignatedRoleMappingDelete => ClaimCategory::Designations,
            ModerationNote | ModerationWarn | ModerationMute | ModerationBan
            | ModerationRescind | ModerationDelete | ModerationRead
            | ModerationMassDeleteMessages | ModerationDeleteMessage => ClaimCategory::Moderation,
            LogViewDeletedMessages => ClaimCategory::Log,
            PromotionsCreateCampaign | PromotionsComment | PromotionsCloseCampaign
            | PromotionsRead => ClaimCategory::Promotions,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, AsRefStr, Display,
)]
pub enum ClaimMappingType {
    Granted,
    Denied,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ClaimDto {
    pub claim: AuthorizationClaim,
    pub category: ClaimCategory,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ClaimMappingDto {
    pub id: i32,
    pub mapping_type: ClaimMappingType,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub role_id: Option<u64>,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub user_id: Option<u64>,
    pub claim: AuthorizationClaim,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
}

/// Replacement claim set for a role or user.
#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct ModifyClaimsDto {
    #[serde(default)]
    pub granted: Vec<AuthorizationClaim>,
    #[serde(default)]
    pub denied: Vec<AuthorizationClaim>,
}
