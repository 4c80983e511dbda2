//! In-process broadcast of moderation and promotion events.
//!
//! Services publish a `Notification` after their changes are committed. The log
//! behaviors in `bot::behavior` subscribe and relay them to designated channels.

use tokio::sync::broadcast;

use crate::server::model::{
    infraction::Infraction,
    message::DeletedMessage,
    promotion::{PromotionCampaign, PromotionComment},
};

/// Number of notifications buffered per subscriber before the oldest are dropped.
pub const NOTIFICATION_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    InfractionCreated {
        infraction: Infraction,
    },
    InfractionRescinded {
        infraction: Infraction,
    },
    InfractionDeleted {
        infraction: Infraction,
        deleted_by_id: u64,
    },
    /// One or more messages removed by a moderator. `batch_id` is set for `clean`.
    MessagesDeleted {
        guild_id: u64,
        channel_id: u64,
        deleted_by_id: u64,
        batch_id: Option<i32>,
        messages: Vec<DeletedMessage>,
    },
    CampaignCreated {
        campaign: PromotionCampaign,
    },
    CampaignCommentCreated {
        campaign: PromotionCampaign,
        comment: PromotionComment,
    },
    CampaignClosed {
        campaign: PromotionCampaign,
    },
}

impl Notification {
    pub fn guild_id(&self) -> u64 {
        match self {
            Self::InfractionCreated { infraction }
            | Self::InfractionRescinded { infraction }
            | Self::InfractionDeleted { infraction, .. } => infraction.guild_id,
            Self::MessagesDeleted { guild_id, .. } => *guild_id,
            Self::CampaignCreated { campaign }
            | Self::CampaignCommentCreated { campaign, .. }
            | Self::CampaignClosed { campaign } => campaign.guild_id,
        }
    }

    pub fn is_moderation(&self) -> bool {
        matches!(
            self,
            Self::InfractionCreated { .. }
                | Self::InfractionRescinded { .. }
                | Self::InfractionDeleted { .. }
                | Self::MessagesDeleted { .. }
        )
    }
}

/// Cloneable handle to the notification channel.
#[derive(Clone)]
pub struct NotificationPublisher {
    sender: broadcast::Sender<Notification>,
}

impl Default for NotificationPublisher {
    fn default() -> Self {
        Self::new(NOTIFICATION_CAPACITY)
    }
}

impl NotificationPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Sends a notification to every current subscriber.
    ///
    /// Having no subscribers is normal while the bot is still connecting.
    pub fn publish(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::trace!("Notification published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}
