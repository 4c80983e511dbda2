use axum::http::StatusCode;
use thiserror::Error;

use crate::model::infraction::InfractionType;

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Reason must be between 1 and {max} characters")]
    InvalidReason { max: usize },

    #[error("A duration can only be given for mutes and bans, not {0}")]
    DurationNotAllowed(InfractionType),

    #[error("Duration must be positive and at most {max_days} days")]
    InvalidDuration { max_days: i64 },

    #[error("You cannot moderate yourself")]
    SelfModeration,

    /// Subject holds a rank greater than or equal to the moderator's.
    #[error("You cannot moderate a user with a rank equal to or above your own")]
    Outranked,

    #[error("User already has an active {0}")]
    AlreadyActive(InfractionType),

    #[error("Infraction {0} not found")]
    InfractionNotFound(i32),

    #[error("Infraction {0} has already been rescinded")]
    AlreadyRescinded(i32),

    #[error("{0} infractions cannot be rescinded")]
    NotRescindable(InfractionType),

    #[error("User has no active {0}")]
    NoActiveInfraction(InfractionType),

    #[error("Message count must be between 1 and {max}, got {count}")]
    InvalidCleanCount { count: u64, max: u64 },

    #[error("Message {0} not found")]
    MessageNotFound(u64),
}

impl ModerationError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidReason { .. }
            | Self::DurationNotAllowed(_)
            | Self::InvalidDuration { .. }
            | Self::SelfModeration
            | Self::NotRescindable(_)
            | Self::InvalidCleanCount { .. } => StatusCode::BAD_REQUEST,
            Self::Outranked => StatusCode::FORBIDDEN,
            Self::InfractionNotFound(_)
            | Self::NoActiveInfraction(_)
            | Self::MessageNotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyActive(_) | Self::AlreadyRescinded(_) => StatusCode::CONFLICT,
        }
    }
}
