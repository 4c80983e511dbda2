pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_discord_user_table;
mod m20250601_000002_create_discord_guild_table;
mod m20250601_000003_create_discord_guild_role_table;
mod m20250601_000004_create_discord_guild_channel_table;
mod m20250601_000005_create_guild_user_table;
mod m20250601_000006_create_guild_user_role_table;
mod m20250601_000007_create_discord_message_table;
mod m20250602_000008_create_designated_channel_mapping_table;
mod m20250602_000009_create_designated_role_mapping_table;
mod m20250602_000010_create_claim_mapping_table;
mod m20250603_000011_create_infraction_table;
mod m20250603_000012_create_deleted_message_batch_table;
mod m20250603_000013_create_deleted_message_table;
mod m20250603_000014_create_moderation_action_table;
mod m20250604_000015_create_promotion_campaign_table;
mod m20250604_000016_create_promotion_comment_table;
mod m20250604_000017_create_promotion_action_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_discord_user_table::Migration),
            Box::new(m20250601_000002_create_discord_guild_table::Migration),
            Box::new(m20250601_000003_create_discord_guild_role_table::Migration),
            Box::new(m20250601_000004_create_discord_guild_channel_table::Migration),
            Box::new(m20250601_000005_create_guild_user_table::Migration),
            Box::new(m20250601_000006_create_guild_user_role_table::Migration),
            Box::new(m20250601_000007_create_discord_message_table::Migration),
            Box::new(m20250602_000008_create_designated_channel_mapping_table::Migration),
            Box::new(m20250602_000009_create_designated_role_mapping_table::Migration),
            Box::new(m20250602_000010_create_claim_mapping_table::Migration),
            Box::new(m20250603_000011_create_infraction_table::Migration),
            Box::new(m20250603_000012_create_deleted_message_batch_table::Migration),
            Box::new(m20250603_000013_create_deleted_message_table::Migration),
            Box::new(m20250603_000014_create_moderation_action_table::Migration),
            Box::new(m20250604_000015_create_promotion_campaign_table::Migration),
            Box::new(m20250604_000016_create_promotion_comment_table::Migration),
            Box::new(m20250604_000017_create_promotion_action_table::Migration),
        ]
    }
}
