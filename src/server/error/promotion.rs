use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromotionError {
    #[error("User {0} is not a member of this guild")]
    SubjectNotMember(u64),

    #[error("You cannot nominate yourself")]
    SelfNomination,

    #[error("User already holds the highest rank")]
    NoNextRank,

    #[error("You can only nominate users to a rank below your own")]
    TargetNotBelowCreator,

    #[error("User already has an open promotion campaign")]
    CampaignAlreadyOpen,

    #[error("A campaign for this user and rank was rejected within the last {days} days")]
    RecentlyRejected { days: i64 },

    #[error("Comment must be between 1 and {max} characters")]
    InvalidComment { max: usize },

    #[error("Campaign {0} not found")]
    CampaignNotFound(i32),

    #[error("Campaign {0} is already closed")]
    CampaignClosed(i32),

    #[error("You cannot comment on your own campaign")]
    SubjectCannotComment,

    #[error("You have already commented on this campaign")]
    AlreadyCommented,

    #[error("Comment {0} not found")]
    CommentNotFound(i32),

    #[error("Only the author can modify a comment")]
    NotCommentAuthor,

    #[error("Campaigns can only be accepted {hours} hours after creation")]
    TooEarlyToAccept { hours: i64 },
}

impl PromotionError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SubjectNotMember(_)
            | Self::SelfNomination
            | Self::NoNextRank
            | Self::InvalidComment { .. }
            | Self::SubjectCannotComment => StatusCode::BAD_REQUEST,
            Self::TargetNotBelowCreator | Self::NotCommentAuthor => StatusCode::FORBIDDEN,
            Self::CampaignNotFound(_) | Self::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Self::CampaignAlreadyOpen
            | Self::RecentlyRejected { .. }
            | Self::CampaignClosed(_)
            | Self::AlreadyCommented
            | Self::TooEarlyToAccept { .. } => StatusCode::CONFLICT,
        }
    }
}
