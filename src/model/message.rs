use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct DeletedMessageDto {
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub message_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub channel_id: u64,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub author_id: u64,
    pub content: String,
    pub reason: String,
    #[serde(with = "crate::model::snowflake")]
    #[schema(value_type = String)]
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub batch_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct PaginatedDeletedMessagesDto {
    pub messages: Vec<DeletedMessageDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}
