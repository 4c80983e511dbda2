//! Domain models for the mirrored Discord entities.

pub mod channel;
pub mod guild;
pub mod guild_user;
pub mod role;
pub mod user;

pub use channel::DiscordGuildChannel;
pub use guild::DiscordGuild;
pub use guild_user::{ChannelMessageCount, GuildUser};
pub use role::DiscordGuildRole;
pub use user::DiscordUser;
