//! Guild membership repository.
//!
//! Tracks every user who has been a member of a guild. Rows survive the user
//! leaving so historical records can still be resolved; `is_member` reflects
//! current membership.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func, IntoColumnRef, LikeExpr},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationDef,
};

use crate::server::{
    model::discord::{DiscordUser, GuildUser},
    util::parse::parse_snowflake,
};

pub struct GuildUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GuildUserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records the user as a current member of the guild.
    ///
    /// Updates nickname and last seen time for existing rows; `first_seen` is
    /// kept from the original insert.
    pub async fn upsert(
        &self,
        guild_id: u64,
        user_id: u64,
        nickname: Option<String>,
    ) -> Result<GuildUser, DbErr> {
        let now = Utc::now();

        let entity = entity::prelude::GuildUser::insert(entity::guild_user::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            nickname: ActiveValue::Set(nickname),
            first_seen: ActiveValue::Set(now),
            last_seen: ActiveValue::Set(now),
            is_member: ActiveValue::Set(true),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::guild_user::Column::GuildId,
                entity::guild_user::Column::UserId,
            ])
            .update_columns([
                entity::guild_user::Column::Nickname,
                entity::guild_user::Column::LastSeen,
                entity::guild_user::Column::IsMember,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GuildUser::from_entity(entity)
    }

    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<GuildUser>, DbErr> {
        self.find_entity(guild_id, user_id)
            .await?
            .map(GuildUser::from_entity)
            .transpose()
    }

    /// Marks the user as no longer in the guild. No-op for unknown users.
    pub async fn mark_left(&self, guild_id: u64, user_id: u64) -> Result<(), DbErr> {
        if let Some(existing) = self.find_entity(guild_id, user_id).await? {
            let mut active: entity::guild_user::ActiveModel = existing.into();
            active.is_member = ActiveValue::Set(false);
            active.update(self.db).await?;
        }

        Ok(())
    }

    /// Bumps last seen time when the user is active in the guild.
    pub async fn touch_last_seen(
        &self,
        guild_id: u64,
        user_id: u64,
        seen_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        if let Some(existing) = self.find_entity(guild_id, user_id).await? {
            if existing.last_seen < seen_at {
                let mut active: entity::guild_user::ActiveModel = existing.into();
                active.last_seen = ActiveValue::Set(seen_at);
                active.update(self.db).await?;
            }
        }

        Ok(())
    }

    /// Gets the ids of the guild's current members.
    pub async fn get_member_ids(&self, guild_id: u64) -> Result<Vec<u64>, DbErr> {
        let ids: Vec<String> = entity::prelude::GuildUser::find()
            .select_only()
            .column(entity::guild_user::Column::UserId)
            .filter(entity::guild_user::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user::Column::IsMember.eq(true))
            .into_tuple()
            .all(self.db)
            .await?;

        ids.iter()
            .map(|id| parse_snowflake(id, "user_id"))
            .collect()
    }

    /// Finds current members whose username, global name or nickname contains
    /// `query`, ignoring case, ordered by username.
    pub async fn search_members(
        &self,
        guild_id: u64,
        query: &str,
        limit: u64,
    ) -> Result<Vec<(DiscordUser, GuildUser)>, DbErr> {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        let rows = entity::prelude::GuildUser::find()
            .join(JoinType::InnerJoin, member_user_relation())
            .select_also(entity::prelude::DiscordUser)
            .filter(entity::guild_user::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user::Column::IsMember.eq(true))
            .filter(
                Condition::any()
                    .add(lower_like(
                        (
                            entity::discord_user::Entity,
                            entity::discord_user::Column::Username,
                        ),
                        &pattern,
                    ))
                    .add(lower_like(
                        (
                            entity::discord_user::Entity,
                            entity::discord_user::Column::GlobalName,
                        ),
                        &pattern,
                    ))
                    .add(lower_like(
                        (
                            entity::guild_user::Entity,
                            entity::guild_user::Column::Nickname,
                        ),
                        &pattern,
                    )),
            )
            .order_by_asc(entity::discord_user::Column::Username)
            .limit(limit)
            .all(self.db)
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for (member, user) in rows {
            if let Some(user) = user {
                results.push((DiscordUser::from_entity(user)?, GuildUser::from_entity(member)?));
            }
        }

        Ok(results)
    }

    async fn find_entity(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<entity::guild_user::Model>, DbErr> {
        entity::prelude::GuildUser::find()
            .filter(entity::guild_user::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_user::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await
    }
}

fn member_user_relation() -> RelationDef {
    entity::guild_user::Entity::belongs_to(entity::discord_user::Entity)
        .from(entity::guild_user::Column::UserId)
        .to(entity::discord_user::Column::DiscordId)
        .into()
}

fn lower_like<C: IntoColumnRef>(column: C, pattern: &str) -> Expr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Escapes LIKE wildcards so they match literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
