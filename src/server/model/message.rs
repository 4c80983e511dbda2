use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serenity::all::Message;

use crate::{
    model::message::{DeletedMessageDto, PaginatedDeletedMessagesDto},
    server::{model::Paginated, util::parse::parse_snowflake},
};

/// A message removed by a moderator, with its content preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedMessage {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
    pub reason: String,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub batch_id: Option<i32>,
}

impl DeletedMessage {
    pub fn from_entity(entity: entity::deleted_message::Model) -> Result<Self, DbErr> {
        Ok(Self {
            message_id: parse_snowflake(&entity.message_id, "message_id")?,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            author_id: parse_snowflake(&entity.author_id, "author_id")?,
            content: entity.content,
            reason: entity.reason,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
            batch_id: entity.batch_id,
        })
    }

    pub fn into_dto(self) -> DeletedMessageDto {
        DeletedMessageDto {
            message_id: self.message_id,
            channel_id: self.channel_id,
            author_id: self.author_id,
            content: self.content,
            reason: self.reason,
            created_by_id: self.created_by_id,
            created_at: self.created_at,
            batch_id: self.batch_id,
        }
    }
}

impl Paginated<DeletedMessage> {
    pub fn into_dto(self) -> PaginatedDeletedMessagesDto {
        PaginatedDeletedMessagesDto {
            messages: self.items.into_iter().map(DeletedMessage::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// A group of messages removed together by `clean`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedMessageBatch {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub created_by_id: u64,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
}

impl DeletedMessageBatch {
    pub fn from_entity(
        entity: entity::deleted_message_batch::Model,
        message_count: usize,
    ) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            created_by_id: parse_snowflake(&entity.created_by_id, "created_by_id")?,
            created_at: entity.created_at,
            message_count,
        })
    }
}

/// A message fetched from Discord before it is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedMessage {
    pub message_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for FetchedMessage {
    fn from(message: &Message) -> Self {
        Self {
            message_id: message.id.get(),
            channel_id: message.channel_id.get(),
            author_id: message.author.id.get(),
            content: message.content.clone(),
            timestamp: DateTime::from_timestamp(message.timestamp.unix_timestamp(), 0)
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Filters for deleted message searches.
#[derive(Debug, Clone, Default)]
pub struct DeletedMessageSearchCriteria {
    pub channel_id: Option<u64>,
    pub author_id: Option<u64>,
    pub created_by_id: Option<u64>,
    pub batch_id: Option<i32>,
    pub content: Option<String>,
}
