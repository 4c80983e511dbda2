//! Discord user repository.
//!
//! Stores the global profile of every Discord user the bot has seen, whether
//! through guild membership, messages, or a web login.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use serenity::all::User;

use crate::server::model::discord::DiscordUser;

pub struct DiscordUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DiscordUserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the user or refreshes their profile fields.
    ///
    /// `created_at` is only written on first insert.
    pub async fn upsert(&self, user: &User) -> Result<DiscordUser, DbErr> {
        let now = Utc::now();

        let entity = entity::prelude::DiscordUser::insert(entity::discord_user::ActiveModel {
            discord_id: ActiveValue::Set(user.id.get().to_string()),
            username: ActiveValue::Set(user.name.clone()),
            global_name: ActiveValue::Set(user.global_name.clone()),
            avatar_hash: ActiveValue::Set(user.avatar.map(|hash| hash.to_string())),
            is_bot: ActiveValue::Set(user.bot),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        // Profile fields may have changed since the user was last seen
        .on_conflict(
            OnConflict::column(entity::discord_user::Column::DiscordId)
                .update_columns([
                    entity::discord_user::Column::Username,
                    entity::discord_user::Column::GlobalName,
                    entity::discord_user::Column::AvatarHash,
                    entity::discord_user::Column::IsBot,
                    entity::discord_user::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        DiscordUser::from_entity(entity)
    }

    pub async fn find_by_id(&self, user_id: u64) -> Result<Option<DiscordUser>, DbErr> {
        entity::prelude::DiscordUser::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .map(DiscordUser::from_entity)
            .transpose()
    }

    /// Gets every stored user among `user_ids`. Unknown ids are skipped.
    pub async fn find_many(&self, user_ids: &[u64]) -> Result<Vec<DiscordUser>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = user_ids.iter().map(|id| id.to_string()).collect();

        entity::prelude::DiscordUser::find()
            .filter(entity::discord_user::Column::DiscordId.is_in(ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordUser::from_entity)
            .collect()
    }
}
