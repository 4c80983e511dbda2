//! Slash command interactions.
//!
//! Options are flattened into the same tokens a text command produces, so both
//! surfaces share parsing and execution. Replies are ephemeral.
//!
//! Discord drops interactions that aren't answered within three seconds, so
//! the response is deferred before the command runs and edited afterwards.

use sea_orm::DatabaseConnection;
use serenity::all::{CommandInteraction, Context, EditInteractionResponse, Interaction};

use crate::server::{
    bot::command::{execute, slash, BotCommand, CommandContext},
    service::{discord::SerenityGuildActions, notification::NotificationPublisher},
    util::text::{truncate, MAX_MESSAGE_LENGTH},
};

pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    notifications: &NotificationPublisher,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        tracing::error!(
            "Failed to defer /{} from {}: {}",
            command.data.name,
            command.user.id,
            e
        );
        return;
    }

    let reply = run_command(db, notifications, &ctx, &command).await;

    if let Err(e) = command.edit_response(&ctx.http, reply_edit(&reply)).await {
        tracing::error!(
            "Failed to respond to /{} from {}: {}",
            command.data.name,
            command.user.id,
            e
        );
    }
}

async fn run_command(
    db: &DatabaseConnection,
    notifications: &NotificationPublisher,
    ctx: &Context,
    command: &CommandInteraction,
) -> String {
    let Some(guild_id) = command.guild_id else {
        return "Commands can only be used in a server.".to_string();
    };

    let tokens = slash::command_tokens(&command.data.name, &command.data.options());

    match BotCommand::parse(&tokens) {
        Ok(parsed) => {
            let actions = SerenityGuildActions::new(ctx.http.clone());
            let cmd = CommandContext {
                db,
                actions: &actions,
                notifications,
                guild_id: guild_id.get(),
                channel_id: command.channel_id.get(),
                invoker_id: command.user.id.get(),
            };

            execute(&cmd, parsed).await
        }
        Err(e) => format!("\u{274c} {}", e),
    }
}

fn reply_edit(reply: &str) -> EditInteractionResponse {
    EditInteractionResponse::new().content(truncate(reply, MAX_MESSAGE_LENGTH))
}
