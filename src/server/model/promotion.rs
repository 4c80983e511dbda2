//! Promotion campaign models.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use strum::{AsRefStr, Display, EnumString};

use crate::{
    model::promotion::{
        CampaignDetailsDto, CampaignOutcome, CampaignSummaryDto, CommentDto, PromotionSentiment,
    },
    server::util::parse::{parse_enum, parse_optional_snowflake, parse_snowflake},
};

/// A review process proposing a member's promotion to the next rank.
///
/// Open while `outcome` is `None`; closed campaigns are immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionCampaign {
    pub id: i32,
    pub guild_id: u64,
    pub subject_id: u64,
    pub target_role_id: u64,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub outcome: Option<CampaignOutcome>,
    pub closed_by_id: Option<u64>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl PromotionCampaign {
    pub fn from_entity(entity: entity::promotion_campaign::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            subject_id: parse_snowflake(&entity.subject_id, "subject_id")?,
            target_role_id: parse_snowflake(&entity.target_role_id, "target_role_id")?,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
            outcome: entity
                .outcome
                .as_deref()
                .map(|outcome| parse_enum(outcome, "outcome"))
                .transpose()?,
            closed_by_id: parse_optional_snowflake(entity.closed_by_id.as_deref(), "closed_by_id")?,
            closed_at: entity.closed_at,
        })
    }

    pub fn is_open(&self) -> bool {
        self.outcome.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionComment {
    pub id: i32,
    pub campaign_id: i32,
    pub sentiment: PromotionSentiment,
    pub content: String,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl PromotionComment {
    pub fn from_entity(entity: entity::promotion_comment::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            sentiment: parse_enum(&entity.sentiment, "sentiment")?,
            content: entity.content,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
            modified_at: entity.modified_at,
        })
    }

    /// Converts to a DTO, revealing the author only to themselves.
    pub fn into_dto(self, viewer_id: u64) -> CommentDto {
        let is_own = self.created_by_id == viewer_id;

        CommentDto {
            id: self.id,
            sentiment: self.sentiment,
            content: self.content,
            author_id: is_own.then_some(self.created_by_id),
            is_own,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

/// A campaign together with its comment tallies.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignSummary {
    pub campaign: PromotionCampaign,
    pub approve_count: u64,
    pub abstain_count: u64,
    pub oppose_count: u64,
}

impl CampaignSummary {
    pub fn from_comments(campaign: PromotionCampaign, comments: &[PromotionComment]) -> Self {
        let count = |sentiment: PromotionSentiment| {
            comments.iter().filter(|c| c.sentiment == sentiment).count() as u64
        };

        Self {
            approve_count: count(PromotionSentiment::Approve),
            abstain_count: count(PromotionSentiment::Abstain),
            oppose_count: count(PromotionSentiment::Oppose),
            campaign,
        }
    }

    pub fn into_dto(self) -> CampaignSummaryDto {
        CampaignSummaryDto {
            id: self.campaign.id,
            subject_id: self.campaign.subject_id,
            target_role_id: self.campaign.target_role_id,
            created_by_id: self.campaign.created_by_id,
            created_at: self.campaign.created_at,
            outcome: self.campaign.outcome,
            closed_at: self.campaign.closed_at,
            approve_count: self.approve_count,
            abstain_count: self.abstain_count,
            oppose_count: self.oppose_count,
        }
    }
}

/// A campaign with its comments, as seen by one viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDetails {
    pub summary: CampaignSummary,
    pub comments: Vec<PromotionComment>,
    pub viewer_id: u64,
}

impl CampaignDetails {
    pub fn into_dto(self) -> CampaignDetailsDto {
        let viewer_id = self.viewer_id;

        CampaignDetailsDto {
            campaign: self.summary.into_dto(),
            comments: self
                .comments
                .into_iter()
                .map(|comment| comment.into_dto(viewer_id))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
pub enum PromotionActionType {
    CampaignCreated,
    CommentCreated,
    CommentModified,
    CampaignClosed,
}
