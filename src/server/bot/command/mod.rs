//! Text and slash commands.
//!
//! Both surfaces reduce a command to tokens, parse them into a `BotCommand`
//! and run it through `execute`, which calls the same services the web API
//! uses.

pub mod execute;
pub mod parse;
pub mod prefix;
pub mod slash;

pub use execute::{execute, CommandContext};
pub use parse::{BotCommand, CommandParseError, HELP_TEXT};
