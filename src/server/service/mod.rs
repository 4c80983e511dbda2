//! Service layer for business logic and orchestration.
//!
//! Services sit between the callers (controllers and bot commands) and the data
//! (repository) layer. They are responsible for:
//!
//! - **Authorization**: Checking the caller's claims from an `AuthContext`
//! - **Business Logic**: Enforcing moderation and promotion rules
//! - **Discord Effects**: Applying changes through `GuildActions` before recording them
//! - **Transaction Management**: Writing records and their audit actions atomically
//! - **Notifications**: Publishing events once changes are committed

pub mod auth;
pub mod authorization;
pub mod designation;
pub mod discord;
pub mod moderation;
pub mod notification;
pub mod promotion;
pub mod rank;
pub mod user;
