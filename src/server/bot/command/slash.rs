//! Slash command definitions and conversion of their options into the tokens
//! the text parser understands.

use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, ResolvedOption, ResolvedValue,
};

/// Option names of each command path in the order the parser expects them.
const OPTION_ORDER: &[(&str, &[&str])] = &[
    ("note", &["user", "reason"]),
    ("warn", &["user", "reason"]),
    ("mute", &["user", "reason"]),
    ("ban", &["user", "reason"]),
    ("tempmute", &["user", "duration", "reason"]),
    ("tempban", &["user", "duration", "reason"]),
    ("unmute", &["user"]),
    ("unban", &["user"]),
    ("infractions", &["user"]),
    ("info", &["user"]),
    ("claims", &["user"]),
    ("clean", &["count", "user"]),
    ("infraction rescind", &["id"]),
    ("infraction delete", &["id"]),
    ("promotions nominate", &["user", "comment"]),
    ("promotions comment", &["id", "sentiment", "comment"]),
    ("promotions accept", &["id", "force"]),
    ("promotions reject", &["id"]),
];

/// Commands registered in every guild the bot joins.
pub fn commands() -> Vec<CreateCommand> {
    let mut commands = vec![CreateCommand::new("help").description("List the bot's commands")];

    for (name, verb) in [
        ("note", "Record a note about"),
        ("warn", "Warn"),
        ("mute", "Mute"),
        ("ban", "Ban"),
    ] {
        commands.push(
            CreateCommand::new(name)
                .description(format!("{} a user", verb))
                .add_option(user_option(true))
                .add_option(string_option("reason", "Why", true)),
        );
    }

    for (name, verb) in [("tempmute", "Mute"), ("tempban", "Ban")] {
        commands.push(
            CreateCommand::new(name)
                .description(format!("{} a user for a limited time", verb))
                .add_option(user_option(true))
                .add_option(string_option("duration", "How long, e.g. 1h 30m", true))
                .add_option(string_option("reason", "Why", true)),
        );
    }

    for (name, description) in [
        ("unmute", "Rescind a user's active mute"),
        ("unban", "Rescind a user's active ban"),
        ("infractions", "List a user's infractions"),
        ("info", "Show what is known about a user"),
    ] {
        commands.push(
            CreateCommand::new(name)
                .description(description)
                .add_option(user_option(true)),
        );
    }

    commands.push(
        CreateCommand::new("claims")
            .description("List the claims a user holds")
            .add_option(user_option(false)),
    );

    commands.push(
        CreateCommand::new("clean")
            .description("Delete the channel's newest messages")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "count", "How many")
                    .min_int_value(1)
                    .max_int_value(100)
                    .required(true),
            )
            .add_option(user_option(false)),
    );

    commands.push(
        CreateCommand::new("infraction")
            .description("Manage an infraction")
            .add_option(
                subcommand("rescind", "Rescind an active mute or ban").add_sub_option(id_option()),
            )
            .add_option(subcommand("delete", "Delete an infraction").add_sub_option(id_option())),
    );

    commands.push(
        CreateCommand::new("promotions")
            .description("Promotion campaigns")
            .add_option(subcommand("list", "List open campaigns"))
            .add_option(
                subcommand("nominate", "Start a campaign for a user")
                    .add_sub_option(user_option(true))
                    .add_sub_option(string_option("comment", "Why they deserve it", true)),
            )
            .add_option(
                subcommand("comment", "Comment on a campaign")
                    .add_sub_option(id_option())
                    .add_sub_option(
                        string_option("sentiment", "Your stance", true)
                            .add_string_choice("Approve", "approve")
                            .add_string_choice("Abstain", "abstain")
                            .add_string_choice("Oppose", "oppose"),
                    )
                    .add_sub_option(string_option("comment", "Your comment", true)),
            )
            .add_option(
                subcommand("accept", "Accept a campaign")
                    .add_sub_option(id_option())
                    .add_sub_option(CreateCommandOption::new(
                        CommandOptionType::Boolean,
                        "force",
                        "Accept before the waiting period has passed",
                    )),
            )
            .add_option(subcommand("reject", "Reject a campaign").add_sub_option(id_option())),
    );

    commands
}

/// Flattens an invoked slash command into parser tokens.
pub fn command_tokens(name: &str, options: &[ResolvedOption<'_>]) -> Vec<String> {
    let mut path = name.to_string();
    let mut tokens = vec![name.to_string()];
    let mut args = Vec::new();

    for option in options {
        match &option.value {
            ResolvedValue::SubCommand(sub_options) => {
                path = format!("{} {}", name, option.name);
                tokens.push(option.name.to_string());
                args.extend(
                    sub_options
                        .iter()
                        .filter_map(|sub| option_token(&sub.value).map(|token| (sub.name, token))),
                );
            }
            value => {
                if let Some(token) = option_token(value) {
                    args.push((option.name, token));
                }
            }
        }
    }

    tokens.extend(order_args(&path, args));
    tokens
}

/// Sorts named arguments into the positional order of the command path.
fn order_args(path: &str, mut args: Vec<(&str, String)>) -> Vec<String> {
    let order = OPTION_ORDER
        .iter()
        .find(|(command, _)| *command == path)
        .map(|(_, order)| *order)
        .unwrap_or_default();

    args.sort_by_key(|(name, _)| {
        order
            .iter()
            .position(|expected| expected == name)
            .unwrap_or(usize::MAX)
    });

    args.into_iter().map(|(_, token)| token).collect()
}

fn option_token(value: &ResolvedValue<'_>) -> Option<String> {
    match value {
        ResolvedValue::User(user, _) => Some(user.id.get().to_string()),
        ResolvedValue::String(value) => Some(value.to_string()),
        ResolvedValue::Integer(value) => Some(value.to_string()),
        ResolvedValue::Boolean(true) => Some("force".to_string()),
        _ => None,
    }
}

fn user_option(required: bool) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "user", "The user").required(required)
}

fn string_option(name: &str, description: &str, required: bool) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, name, description).required(required)
}

fn id_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Integer, "id", "The id")
        .min_int_value(1)
        .required(true)
}

fn subcommand(name: &str, description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
}
