//! Deleted message repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    message::{DeletedMessage, DeletedMessageBatch, DeletedMessageSearchCriteria, FetchedMessage},
    Paginated,
};

pub struct DeletedMessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeletedMessageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores the content of a message removed by a moderator.
    pub async fn create(
        &self,
        guild_id: u64,
        message: &FetchedMessage,
        reason: &str,
        created_by_id: u64,
        batch_id: Option<i32>,
    ) -> Result<DeletedMessage, DbErr> {
        let entity = entity::deleted_message::ActiveModel {
            message_id: ActiveValue::Set(message.message_id.to_string()),
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(message.channel_id.to_string()),
            author_id: ActiveValue::Set(message.author_id.to_string()),
            content: ActiveValue::Set(message.content.clone()),
            reason: ActiveValue::Set(reason.to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            batch_id: ActiveValue::Set(batch_id),
        }
        .insert(self.db)
        .await?;

        DeletedMessage::from_entity(entity)
    }

    /// Creates an empty batch; messages are attached through `create`.
    pub async fn create_batch(
        &self,
        guild_id: u64,
        channel_id: u64,
        created_by_id: u64,
    ) -> Result<DeletedMessageBatch, DbErr> {
        let entity = entity::deleted_message_batch::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
            created_by_id: ActiveValue::Set(created_by_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DeletedMessageBatch::from_entity(entity, 0)
    }

    pub async fn find_batch(&self, batch_id: i32) -> Result<Option<DeletedMessageBatch>, DbErr> {
        let Some(entity) = entity::prelude::DeletedMessageBatch::find_by_id(batch_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let count = entity::prelude::DeletedMessage::find()
            .filter(entity::deleted_message::Column::BatchId.eq(batch_id))
            .count(self.db)
            .await?;

        DeletedMessageBatch::from_entity(entity, count as usize).map(Some)
    }

    /// Searches deleted messages in the guild, newest first.
    pub async fn search(
        &self,
        guild_id: u64,
        criteria: &DeletedMessageSearchCriteria,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<DeletedMessage>, DbErr> {
        let mut query = entity::prelude::DeletedMessage::find()
            .filter(entity::deleted_message::Column::GuildId.eq(guild_id.to_string()));

        if let Some(channel_id) = criteria.channel_id {
            query = query
                .filter(entity::deleted_message::Column::ChannelId.eq(channel_id.to_string()));
        }
        if let Some(author_id) = criteria.author_id {
            query =
                query.filter(entity::deleted_message::Column::AuthorId.eq(author_id.to_string()));
        }
        if let Some(created_by_id) = criteria.created_by_id {
            query = query
                .filter(entity::deleted_message::Column::CreatedById.eq(created_by_id.to_string()));
        }
        if let Some(batch_id) = criteria.batch_id {
            query = query.filter(entity::deleted_message::Column::BatchId.eq(batch_id));
        }
        if let Some(content) = criteria.content.as_deref().filter(|c| !c.is_empty()) {
            query = query.filter(entity::deleted_message::Column::Content.contains(content));
        }

        let paginator = query
            .order_by_desc(entity::deleted_message::Column::CreatedAt)
            .paginate(self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(DeletedMessage::from_entity)
            .collect::<Result<Vec<_>, DbErr>>()?;

        Ok(Paginated {
            items,
            total,
            page,
            per_page,
        })
    }
}
