//! Cron jobs run alongside the bot and the web API.

pub mod infraction_expiry;
