//! Promotion campaign, comment and audit repositories.

pub mod action;
pub mod campaign;
pub mod comment;

pub use action::PromotionActionRepository;
pub use campaign::PromotionCampaignRepository;
pub use comment::PromotionCommentRepository;
