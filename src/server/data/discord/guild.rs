use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::model::discord::DiscordGuild;

pub struct DiscordGuildRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DiscordGuildRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the guild or updates its name, icon and owner.
    ///
    /// Takes plain fields since guild updates from the gateway arrive as
    /// partial guilds rather than full ones.
    pub async fn upsert(
        &self,
        guild_id: u64,
        name: &str,
        icon_hash: Option<String>,
        owner_id: u64,
    ) -> Result<DiscordGuild, DbErr> {
        let entity = entity::prelude::DiscordGuild::insert(entity::discord_guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            icon_hash: ActiveValue::Set(icon_hash),
            owner_id: ActiveValue::Set(owner_id.to_string()),
        })
        .on_conflict(
            OnConflict::column(entity::discord_guild::Column::GuildId)
                .update_columns([
                    entity::discord_guild::Column::Name,
                    entity::discord_guild::Column::IconHash,
                    entity::discord_guild::Column::OwnerId,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        DiscordGuild::from_entity(entity)
    }

    pub async fn get_all(&self) -> Result<Vec<DiscordGuild>, DbErr> {
        entity::prelude::DiscordGuild::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordGuild::from_entity)
            .collect()
    }

    /// Finds a guild by its Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(DiscordGuild))`: Guild found in database
    /// - `Ok(None)`: Guild not found (bot not in this guild)
    /// - `Err(DbErr)`: Database error during query
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<DiscordGuild>, DbErr> {
        entity::prelude::DiscordGuild::find()
            .filter(entity::discord_guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(DiscordGuild::from_entity)
            .transpose()
    }

    /// Gets guilds the user is currently a member of.
    pub async fn get_guilds_for_user(&self, user_id: u64) -> Result<Vec<DiscordGuild>, DbErr> {
        let guild_ids: Vec<String> = entity::prelude::GuildUser::find()
            .filter(entity::guild_user::Column::UserId.eq(user_id.to_string()))
            .filter(entity::guild_user::Column::IsMember.eq(true))
            .all(self.db)
            .await?
            .into_iter()
            .map(|member| member.guild_id)
            .collect();

        if guild_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::DiscordGuild::find()
            .filter(entity::discord_guild::Column::GuildId.is_in(guild_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(DiscordGuild::from_entity)
            .collect()
    }
}
