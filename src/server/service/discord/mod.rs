//! Mirroring of Discord guilds, roles, channels, members and messages, plus the
//! `GuildActions` seam services use to act on Discord.

pub mod actions;
pub mod channel;
pub mod guild;
pub mod member;
pub mod message;
pub mod role;

pub use actions::{GuildActions, SerenityGuildActions};
pub use channel::DiscordGuildChannelService;
pub use guild::DiscordGuildService;
pub use member::GuildMemberService;
pub use message::DiscordMessageService;
pub use role::DiscordGuildRoleService;
