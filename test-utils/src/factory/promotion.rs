//! Promotion campaign and comment factories.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, NotSet};

/// Factory for creating promotion campaigns.
///
/// Defaults to an open campaign created now by user `"1"`.
pub struct PromotionCampaignFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    subject_id: String,
    target_role_id: String,
    created_by_id: String,
    created_at: DateTime<Utc>,
    outcome: Option<String>,
}

impl<'a> PromotionCampaignFactory<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        guild_id: &str,
        subject_id: &str,
        target_role_id: &str,
    ) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            subject_id: subject_id.to_string(),
            target_role_id: target_role_id.to_string(),
            created_by_id: "1".to_string(),
            created_at: Utc::now(),
            outcome: None,
        }
    }

    pub fn created_by(mut self, created_by_id: &str) -> Self {
        self.created_by_id = created_by_id.to_string();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Closes the campaign with the given outcome name, e.g. `"Rejected"`.
    pub fn outcome(mut self, outcome: &str) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub async fn build(self) -> Result<entity::promotion_campaign::Model, DbErr> {
        let closed = self.outcome.is_some();
        entity::promotion_campaign::ActiveModel {
            id: NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            subject_id: ActiveValue::Set(self.subject_id),
            target_role_id: ActiveValue::Set(self.target_role_id),
            created_by_id: ActiveValue::Set(self.created_by_id),
            created_at: ActiveValue::Set(self.created_at),
            outcome: ActiveValue::Set(self.outcome),
            closed_by_id: ActiveValue::Set(closed.then(|| "1".to_string())),
            closed_at: ActiveValue::Set(closed.then_some(self.created_at)),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open campaign.
pub async fn create_campaign(
    db: &DatabaseConnection,
    guild_id: &str,
    subject_id: &str,
    target_role_id: &str,
) -> Result<entity::promotion_campaign::Model, DbErr> {
    PromotionCampaignFactory::new(db, guild_id, subject_id, target_role_id)
        .build()
        .await
}

/// Adds a comment to a campaign.
pub async fn create_comment(
    db: &DatabaseConnection,
    campaign_id: i32,
    author_id: &str,
    sentiment: &str,
) -> Result<entity::promotion_comment::Model, DbErr> {
    entity::promotion_comment::ActiveModel {
        id: NotSet,
        campaign_id: ActiveValue::Set(campaign_id),
        sentiment: ActiveValue::Set(sentiment.to_string()),
        content: ActiveValue::Set(format!("{} comment", sentiment)),
        created_by_id: ActiveValue::Set(author_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        modified_at: ActiveValue::Set(None),
    }
    .insert(db)
    .await
}
