//! Repositories for the local mirror of Discord guild state.

pub mod channel;
pub mod guild;
pub mod guild_user;
pub mod guild_user_role;
pub mod message;
pub mod role;
pub mod user;

pub use channel::DiscordGuildChannelRepository;
pub use guild::DiscordGuildRepository;
pub use guild_user::GuildUserRepository;
pub use guild_user_role::GuildUserRoleRepository;
pub use message::DiscordMessageRepository;
pub use role::DiscordGuildRoleRepository;
pub use user::DiscordUserRepository;
