use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

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
pub enum InfractionType {
    Notice,
    Warning,
    Mute,
    Ban,
}

impl InfractionType {
    /// Whether the infraction applies an effect on Discord that lasts until
    /// rescinded (a mute role or a ban).
    pub fn is_rescindable(&self) -> bool {
        matches!(self, InfractionType::Mute | InfractionType::Ban)
    }
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct InfractionDto {
    pub id: i32,
    pub infraction_type: InfractionType,
    pub reason: String,
    pub duration_secs: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub subject_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub rescinded_by_id: Option<u64>,
    pub rescinded_at: Option<DateTime<Utc>>,
    pub rescind_reason: Option<String>,
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub deleted_by_id: Option<u64>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct PaginatedInfractionsDto {
    pub infractions: Vec<InfractionDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateInfractionDto {
    pub infraction_type: InfractionType,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub subject_id: u64,
    pub reason: String,
    /// Duration in seconds, only valid for mutes and bans.
    pub duration_secs: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct RescindInfractionDto {
    pub reason: Option<String>,
}

/// Number of non-deleted infractions per type.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug, ToSchema)]
pub struct InfractionCountsDto {
    pub notice: u64,
    pub warning: u64,
    pub mute: u64,
    pub ban: u64,
}
