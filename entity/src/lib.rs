//! SeaORM entity definitions for the Modix datastore.
//!
//! Discord snowflakes are stored as strings and enumerations as their string
//! names; conversion into typed domain models happens in the application's
//! repository layer.

pub mod prelude;

pub mod claim_mapping;
pub mod deleted_message;
pub mod deleted_message_batch;
pub mod designated_channel_mapping;
pub mod designated_role_mapping;
pub mod discord_guild;
pub mod discord_guild_channel;
pub mod discord_guild_role;
pub mod discord_message;
pub mod discord_user;
pub mod guild_user;
pub mod guild_user_role;
pub mod infraction;
pub mod moderation_action;
pub mod promotion_action;
pub mod promotion_campaign;
pub mod promotion_comment;
