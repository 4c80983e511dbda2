//! Discord bot: gateway event handlers, commands and log behaviors.
//!
//! The bot is built during startup and runs in its own tokio task so it never
//! blocks the HTTP server. Its HTTP client is shared with the web API and the
//! scheduler, which act on Discord through `SerenityGuildActions`.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, role and channel lifecycle
//! - `GUILD_MEMBERS` - Member joins, leaves and updates (privileged)
//! - `GUILD_MESSAGES` - Message create, update and delete
//! - `MESSAGE_CONTENT` - Content of messages for commands and the message log
//!   (privileged)
//!
//! Privileged intents must be enabled in the Discord Developer Portal for the
//! bot application.

pub mod behavior;
pub mod command;
pub mod handler;
pub mod start;
