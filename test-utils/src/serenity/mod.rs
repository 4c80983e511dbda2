//! Builders for Serenity API objects used in tests.
//!
//! Objects are created by deserializing JSON shaped like Discord's API payloads,
//! so they are exactly what the gateway or REST client would hand to the bot.

pub mod guild;
pub mod member;
pub mod role;
pub mod user;

pub use guild::create_test_guild;
pub use member::create_test_member;
pub use role::{create_test_role, create_test_role_with_permissions};
pub use user::create_test_user;
