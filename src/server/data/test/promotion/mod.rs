use crate::{
    model::promotion::{CampaignOutcome, PromotionSentiment},
    server::data::promotion::{PromotionCampaignRepository, PromotionCommentRepository},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
