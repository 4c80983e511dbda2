//! HTTP request handlers.
//!
//! Controllers resolve the caller through `AuthGuard`, convert DTOs into
//! service arguments and map domain models back into DTOs. Claim checks live in
//! the services so the bot commands enforce the same rules.

pub mod auth;
pub mod authorization;
pub mod designation;
pub mod guild;
pub mod infraction;
pub mod param;
pub mod promotion;
