use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{
        discord::GuildActions, moderation::ModerationService, notification::NotificationPublisher,
    },
};

/// Starts the infraction expiry scheduler
///
/// Runs every minute and rescinds mutes and bans whose duration has elapsed.
/// The rescissions are attributed to the bot's own user.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client, used to resolve the bot's user id
/// - `actions`: Discord side effects for lifting mutes and bans
/// - `notifications`: Publisher the rescissions are announced on
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    actions: Arc<dyn GuildActions>,
    notifications: NotificationPublisher,
) -> Result<JobScheduler, AppError> {
    let bot_id = discord_http.get_current_user().await?.id.get();

    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let actions = actions.clone();
        let notifications = notifications.clone();

        Box::pin(async move {
            if let Err(e) = process_expired(&db, actions.as_ref(), &notifications, bot_id).await {
                tracing::error!("Error rescinding expired infractions: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Infraction expiry scheduler started");

    Ok(scheduler)
}

pub async fn process_expired(
    db: &DatabaseConnection,
    actions: &dyn GuildActions,
    notifications: &NotificationPublisher,
    bot_id: u64,
) -> Result<usize, AppError> {
    ModerationService::new(db, actions, notifications)
        .auto_rescind_expired(Utc::now(), bot_id)
        .await
}
