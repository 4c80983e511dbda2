use sea_orm::DatabaseConnection;
use serenity::{
    all::{Client, GatewayIntents},
    cache::Settings,
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError,
    service::notification::NotificationPublisher,
};

/// Messages kept per channel so edits and deletions can show the old content.
const MESSAGE_CACHE_SIZE: usize = 500;

/// Builds the Discord client without connecting it.
///
/// The client's HTTP handle is returned alongside it so the web API and the
/// scheduler can act on Discord while the gateway runs in its own task.
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - The client and its shared HTTP handle
/// - `Err(AppError::DiscordErr)` - The token was rejected by the client builder
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    notifications: NotificationPublisher,
) -> Result<(Client, Arc<Http>), AppError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents and must be
    // enabled in the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut cache_settings = Settings::default();
    cache_settings.max_messages = MESSAGE_CACHE_SIZE;

    let handler = Handler::new(db, notifications, config.command_prefix.clone());

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .cache_settings(cache_settings)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects to the gateway and runs until the connection is shut down.
///
/// Should be spawned on its own task since it doesn't return while the bot is
/// running.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
