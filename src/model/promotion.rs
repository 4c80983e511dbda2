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
pub enum PromotionSentiment {
    Approve,
    Abstain,
    Oppose,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, AsRefStr, Display,
)]
pub enum CampaignOutcome {
    Accepted,
    Rejected,
    Failed,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CampaignSummaryDto {
    pub id: i32,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub subject_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub target_role_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub outcome: Option<CampaignOutcome>,
    pub closed_at: Option<DateTime<Utc>>,
    pub approve_count: u64,
    pub abstain_count: u64,
    pub oppose_count: u64,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub sentiment: PromotionSentiment,
    pub content: String,
    /// Only present on the caller's own comments.
    #[serde(with = "crate::model::snowflake::option")]
    #[schema(value_type = Option<String>)]
    pub author_id: Option<u64>,
    pub is_own: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CampaignDetailsDto {
    pub campaign: CampaignSummaryDto,
    pub comments: Vec<CommentDto>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateCampaignDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub subject_id: u64,
    pub comment: String,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CommentBodyDto {
    pub sentiment: PromotionSentiment,
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Default, ToSchema)]
pub struct AcceptCampaignDto {
    #[serde(default)]
    pub force: bool,
}
