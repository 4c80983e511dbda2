mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    scheduler::infraction_expiry,
    service::{
        discord::{GuildActions, SerenityGuildActions},
        notification::NotificationPublisher,
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let notifications = NotificationPublisher::default();

    tracing::info!("Starting server");

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) =
        bot::start::init_bot(&config, db.clone(), notifications.clone()).await?;
    let guild_actions: Arc<dyn GuildActions> =
        Arc::new(SerenityGuildActions::new(discord_http.clone()));

    // Subscribe the log behaviors before anything can publish
    bot::behavior::spawn_log_behaviors(
        db.clone(),
        guild_actions.clone(),
        &notifications,
        config.app_url.clone(),
    );

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let _scheduler = infraction_expiry::start_scheduler(
        db.clone(),
        discord_http.clone(),
        guild_actions.clone(),
        notifications.clone(),
    )
    .await?;

    let app = server::router::router(&config.app_url)?
        .with_state(AppState::new(
            db,
            http_client,
            oauth_client,
            discord_http,
            guild_actions,
            notifications,
            config.app_url.clone(),
        ))
        .layer(session);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
