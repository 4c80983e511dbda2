//! Factory methods for creating test data.
//!
//! Each entity has a `*Factory` builder for customization and a `create_*`
//! convenience function for quick default creation. Snowflake ids default to
//! unique values drawn from a shared counter so factories can be combined freely.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::create_guild(db).await?;
//! let (user, member) = factory::create_member(db, &guild.guild_id).await?;
//! let role = factory::discord_guild_role::DiscordGuildRoleFactory::new(db, &guild.guild_id)
//!     .position(5)
//!     .build()
//!     .await?;
//! factory::create_guild_user_role(db, &guild.guild_id, &user.discord_id, &role.role_id).await?;
//! ```

pub mod claim_mapping;
pub mod deleted_message;
pub mod designation;
pub mod discord_guild;
pub mod discord_guild_channel;
pub mod discord_guild_role;
pub mod discord_message;
pub mod discord_user;
pub mod guild_user;
pub mod helpers;
pub mod infraction;
pub mod promotion;

pub use claim_mapping::{create_role_claim, create_user_claim};
pub use deleted_message::create_deleted_message;
pub use designation::{create_designated_channel, create_designated_role};
pub use discord_guild::create_guild;
pub use discord_guild_channel::{create_guild_channel, create_guild_channel_with_id};
pub use discord_guild_role::{create_guild_role, create_guild_role_with_position};
pub use discord_message::create_discord_message;
pub use discord_user::{create_user, create_user_with_id};
pub use guild_user::{create_guild_user, create_guild_user_role};
pub use helpers::{create_member, create_member_with_roles};
pub use infraction::create_infraction;
pub use promotion::{create_campaign, create_comment};
