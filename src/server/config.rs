//! Environment based configuration.
//!
//! Variables are read once at startup. A `.env` file is loaded by `main` before
//! `Config::from_env` runs, see `.env.example` for every variable.

use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_COMMAND_PREFIX: &str = "!";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub app_url: String,
    pub bind_address: SocketAddr,
    pub command_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bind_address = optional_var("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address =
            bind_address
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: "BIND_ADDRESS".to_string(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            discord_bot_token: required_var("DISCORD_BOT_TOKEN")?,
            discord_client_id: required_var("DISCORD_CLIENT_ID")?,
            discord_client_secret: required_var("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required_var("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            app_url: required_var("APP_URL")?,
            bind_address,
            command_prefix: optional_var("COMMAND_PREFIX")
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and empty variables are both treated as absent.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
