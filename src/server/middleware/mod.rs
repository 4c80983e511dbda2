//! Request-scoped helpers for authentication.
//!
//! - `session` - Typed wrappers over the tower-sessions `Session`
//! - `auth` - `AuthGuard` resolving the logged in user and their guild claims

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
