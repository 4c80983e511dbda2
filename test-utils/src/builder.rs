use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` or one of the grouped helpers, then call
/// `build()` to create an in-memory SQLite database containing those tables.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(DiscordUser)
///     .with_table(GuildUser)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates the CREATE TABLE statement from the SeaORM entity using SQLite
    /// syntax. The table is created when `build()` is called.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the Discord mirror tables: users, guilds, roles, channels, guild
    /// memberships, membership roles and messages.
    pub fn with_discord_tables(self) -> Self {
        self.with_table(DiscordUser)
            .with_table(DiscordGuild)
            .with_table(DiscordGuildRole)
            .with_table(DiscordGuildChannel)
            .with_table(GuildUser)
            .with_table(GuildUserRole)
            .with_table(DiscordMessage)
    }

    /// Adds the Discord mirror tables plus claim mappings and designations.
    pub fn with_authorization_tables(self) -> Self {
        self.with_discord_tables()
            .with_table(ClaimMapping)
            .with_table(DesignatedChannelMapping)
            .with_table(DesignatedRoleMapping)
    }

    /// Adds everything the moderation subsystem touches.
    ///
    /// Includes the authorization tables since infraction creation checks claims
    /// and designated rank roles.
    pub fn with_moderation_tables(self) -> Self {
        self.with_authorization_tables()
            .with_table(Infraction)
            .with_table(DeletedMessageBatch)
            .with_table(DeletedMessage)
            .with_table(ModerationAction)
    }

    /// Adds everything the promotion subsystem touches.
    pub fn with_promotion_tables(self) -> Self {
        self.with_authorization_tables()
            .with_table(PromotionCampaign)
            .with_table(PromotionComment)
            .with_table(PromotionAction)
    }

    /// Adds every table in the datastore.
    pub fn with_all_tables(self) -> Self {
        self.with_moderation_tables()
            .with_table(PromotionCampaign)
            .with_table(PromotionComment)
            .with_table(PromotionAction)
    }

    /// Builds the test context, creating every configured table.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create a table
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();

        context.with_tables(self.tables).await?;

        Ok(context)
    }
}
