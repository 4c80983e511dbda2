//! Log behaviors relaying events into designated channels.
//!
//! The moderation and promotion logs subscribe to the `NotificationPublisher`
//! and run for the lifetime of the process. The message log is driven
//! directly by the gateway's edit and delete events.

use sea_orm::DatabaseConnection;
use std::{future::Future, sync::Arc};
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::{
    model::designation::DesignatedChannelType,
    server::{
        error::AppError,
        service::{
            designation::DesignationService,
            discord::GuildActions,
            notification::{Notification, NotificationPublisher},
        },
        util::text::{truncate, MAX_MESSAGE_LENGTH},
    },
};

pub mod message_log;
pub mod moderation_log;
pub mod promotion_log;

/// Spawns the moderation and promotion log tasks.
pub fn spawn_log_behaviors(
    db: DatabaseConnection,
    actions: Arc<dyn GuildActions>,
    notifications: &NotificationPublisher,
    app_url: String,
) {
    let receiver = notifications.subscribe();
    let moderation_db = db.clone();
    let moderation_actions = actions.clone();
    tokio::spawn(async move {
        listen("moderation log", receiver, |notification| {
            let db = moderation_db.clone();
            let actions = moderation_actions.clone();
            async move { moderation_log::relay(&db, actions.as_ref(), &notification).await }
        })
        .await
    });

    let receiver = notifications.subscribe();
    tokio::spawn(async move {
        listen("promotion log", receiver, |notification| {
            let db = db.clone();
            let actions = actions.clone();
            let app_url = app_url.clone();
            async move { promotion_log::relay(&db, actions.as_ref(), &app_url, &notification).await }
        })
        .await
    });
}

/// Feeds every notification to `relay` until the publisher is dropped.
async fn listen<F, Fut>(name: &str, mut receiver: Receiver<Notification>, relay: F)
where
    F: Fn(Notification) -> Fut,
    Fut: Future<Output = Result<(), AppError>>,
{
    tracing::info!("Started {}", name);

    loop {
        match receiver.recv().await {
            Ok(notification) => {
                if let Err(e) = relay(notification).await {
                    tracing::error!("Failed to relay notification to {}: {}", name, e);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("{} fell behind and skipped {} notifications", name, skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    tracing::info!("Stopped {}", name);
}

/// Sends `content` to every channel of the guild holding the designation.
///
/// A channel that rejects the message is logged and skipped.
pub(crate) async fn post_to_designated(
    db: &DatabaseConnection,
    actions: &dyn GuildActions,
    guild_id: u64,
    designation: DesignatedChannelType,
    content: &str,
) -> Result<usize, AppError> {
    let channel_ids = DesignationService::new(db)
        .channels_for(guild_id, designation)
        .await?;
    let content = truncate(content, MAX_MESSAGE_LENGTH);
    let mut posted = 0;

    for channel_id in channel_ids {
        match actions.send_message(channel_id, &content).await {
            Ok(()) => posted += 1,
            Err(e) => tracing::warn!(
                "Failed to post to {} channel {} in guild {}: {}",
                designation,
                channel_id,
                guild_id,
                e
            ),
        }
    }

    Ok(posted)
}
