pub use super::claim_mapping::Entity as ClaimMapping;
pub use super::deleted_message::Entity as DeletedMessage;
pub use super::deleted_message_batch::Entity as DeletedMessageBatch;
pub use super::designated_channel_mapping::Entity as DesignatedChannelMapping;
pub use super::designated_role_mapping::Entity as DesignatedRoleMapping;
pub use super::discord_guild::Entity as DiscordGuild;
pub use super::discord_guild_channel::Entity as DiscordGuildChannel;
pub use super::discord_guild_role::Entity as DiscordGuildRole;
pub use super::discord_message::Entity as DiscordMessage;
pub use super::discord_user::Entity as DiscordUser;
pub use super::guild_user::Entity as GuildUser;
pub use super::guild_user_role::Entity as GuildUserRole;
pub use super::infraction::Entity as Infraction;
pub use super::moderation_action::Entity as ModerationAction;
pub use super::promotion_action::Entity as PromotionAction;
pub use super::promotion_campaign::Entity as PromotionCampaign;
pub use super::promotion_comment::Entity as PromotionComment;
