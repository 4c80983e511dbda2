//! Request and response DTOs for the web API.
//!
//! These types define the JSON contract of the `/api` routes and carry the
//! enumerations shared between the web API and the bot. Discord snowflakes are
//! serialized as strings since JavaScript numbers cannot hold them losslessly.

pub mod api;
pub mod authorization;
pub mod designation;
pub mod discord;
pub mod infraction;
pub mod message;
pub mod promotion;
pub mod snowflake;
pub mod user;
