//! Gateway event handlers.
//!
//! Each event is forwarded to the handler module of its kind. Handlers log
//! their failures and return; nothing is propagated back to Serenity.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, EventHandler, Guild, GuildChannel, GuildId, GuildMemberUpdateEvent,
    Interaction, Member, Message, MessageId, MessageUpdateEvent, Ready, Role, RoleId, User,
};
use serenity::async_trait;

use crate::server::service::notification::NotificationPublisher;

pub mod channel;
pub mod guild;
pub mod interaction;
pub mod member;
pub mod message;
pub mod ready;
pub mod role;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub notifications: NotificationPublisher,
    pub command_prefix: String,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        notifications: NotificationPublisher,
        command_prefix: String,
    ) -> Self {
        Self {
            db,
            notifications,
            command_prefix,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.db, ctx, guild, is_new).await;
    }

    async fn guild_role_create(&self, ctx: Context, new: Role) {
        role::handle_guild_role_create(&self.db, ctx, new).await;
    }

    async fn guild_role_update(&self, ctx: Context, old: Option<Role>, new: Role) {
        role::handle_guild_role_update(&self.db, ctx, old, new).await;
    }

    async fn guild_role_delete(
        &self,
        ctx: Context,
        guild_id: GuildId,
        removed_role_id: RoleId,
        removed_role_data_if_in_cache: Option<Role>,
    ) {
        role::handle_guild_role_delete(
            &self.db,
            ctx,
            guild_id,
            removed_role_id,
            removed_role_data_if_in_cache,
        )
        .await;
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.db, ctx, new_member).await;
    }

    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(
            &self.db,
            ctx,
            guild_id,
            user,
            member_data_if_available,
        )
        .await;
    }

    /// Called when a member's roles or nickname change
    async fn guild_member_update(
        &self,
        ctx: Context,
        old: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        member::handle_guild_member_update(&self.db, ctx, old, new, event).await;
    }

    async fn channel_create(&self, ctx: Context, channel: GuildChannel) {
        channel::handle_channel_create(&self.db, ctx, channel).await;
    }

    async fn channel_update(&self, ctx: Context, old: Option<GuildChannel>, new: GuildChannel) {
        channel::handle_channel_update(&self.db, ctx, old, new).await;
    }

    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.db, ctx, channel, messages).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.db, &self.notifications, &self.command_prefix, ctx, message)
            .await;
    }

    async fn message_update(
        &self,
        ctx: Context,
        old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        message::handle_message_update(&self.db, ctx, old_if_available, new, event).await;
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        message::handle_message_delete(&self.db, ctx, channel_id, deleted_message_id, guild_id)
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.db, &self.notifications, ctx, interaction)
            .await;
    }
}
